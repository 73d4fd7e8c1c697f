/// Bucket fill capacity (FR) used when nothing else is configured.
pub const DEFAULT_BUCKET_FILL: usize = 8;

/// Records per page used when BUILD is given no page size.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Multiplier of the polynomial string hash.
pub const HASH_MULTIPLIER: u32 = 31;

/// How many records of the first and last page a build report shows.
pub const PREVIEW_RECORDS: usize = 20;

/// Word list locations tried, in order, relative to the base directory.
pub const WORDS_CANDIDATES: [&str; 5] = [
    "words_alpha.txt",
    "english-words.txt",
    "english_words.txt",
    "english-words-master/words_alpha.txt",
    "english-words-master/english-words-master/words_alpha.txt",
];
