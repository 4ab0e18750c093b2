/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Literal shown by the forum for an event that never happened ("Never")
pub const NEVER_LITERAL: &str = "Jamais";
/// Relative date part meaning "today"
pub const TODAY_LITERAL: &str = "Aujourd'hui";
/// Relative date part meaning "yesterday"
pub const YESTERDAY_LITERAL: &str = "Hier";

/// Separator between the date part and the time part of a post date:
/// a hyphen or the preposition "à", surrounded by single spaces.
pub const DATE_TIME_SEPARATOR: &str = " [-à] ";
/// Separator between hours and minutes
pub const TIME_SEPARATOR: char = ':';
/// Separator between the tokens of a textual date ("Lun 3 Mar 2023")
pub const WORD_SEPARATOR: char = ' ';
/// Separator of the numeric dates found in the member list ("15/06/2022")
pub const USERLIST_SEPARATOR: char = '/';

/// Abbreviated French month prefixes, in lookup order.
/// "Mar" must stay ahead of "Mai", "Juin" ahead of "Juil".
pub const FRENCH_MONTHS: [(&str, u8); 12] = [
    ("Ja", 1),
    ("F", 2),
    ("Mar", 3),
    ("Av", 4),
    ("Mai", 5),
    ("Juin", 6),
    ("Juil", 7),
    ("Ao", 8),
    ("S", 9),
    ("O", 10),
    ("N", 11),
    ("D", 12),
];

/// CSS selector for inline scripts
pub const SCRIPT_SELECTOR: &str = "script";

/// Body of the forum's `do_pagination_start` routine. Group 1 is the last
/// page number, group 2 the number of items per page.
pub const PAGINATION_PATTERN: &str = concat!(
    r"function do_pagination_start\(\)[^}]*",
    r"start = \(start > \d+\) \? (\d+) : start;[^}]*",
    r"start = \(start - 1\) \* (\d+);[^}]*\}",
);

/// Page count used when no pagination bootstrap is found
pub const DEFAULT_PAGE_COUNT: u32 = 1;
/// Items per page used when no pagination bootstrap is found
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 0;

/// Characters stripped from archived file names
pub const ILLEGAL_FILENAME_CHARS: [char; 10] = ['?', '<', '>', '|', '*', '/', '\\', '"', ':', ';'];

/// Length of the tokens produced by `util::random_string`
pub const RANDOM_TOKEN_LENGTH: usize = 8;
