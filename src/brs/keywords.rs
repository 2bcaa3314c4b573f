//! Keyword, operator and builtin tables
//!
//!     The classifier never hardcodes a word. Every reserved word it knows about lives in one
//!     of the categorized lists of [KeywordLists], and the category decides both the style a
//!     word gets and whether it moves the nesting counter:
//!
//!         openers / control_openers       open a block (`sub`, `function` / `if`, `for`, ...)
//!         self_closing_openers            open a block and mark the line as inline (`do`)
//!         middle_control                  control words that never nest (`then`, `exit for`)
//!         continuations                   the subset of middle words that sit one level out
//!                                         (`else`, `catch`); only used by indentation
//!         double_closers                  the first half of a two-word closer (`end` + `if`)
//!         closers / control_closers       fused closers (`endsub` / `endif`, `next`)
//!         no_indent                       directive-like words that never nest (`library`)
//!
//!     The remaining lists only affect styling.
//!
//! Matching
//!
//!     Lists are compiled once into anchored, case-insensitive regexes of the form
//!     `^(?:w1|w2|...)\b`. Alternatives are tried in list order and the trailing word boundary
//!     makes each one a whole-word match, so `str` never matches the front of `string`.
//!     Multi-word entries (`exit for`) accept any run of blanks between the words.
//!
//!     [KeywordTables] is immutable once compiled. The standard BrightScript set is built
//!     lazily the first time it is asked for and shared by every lexer afterwards; lexers only
//!     ever hold a reference to it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Two-character operators, tried before the single-character ones.
pub(crate) static DOUBLE_OPERATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:<>|<=|>=|<<|>>)").unwrap());
pub(crate) static SINGLE_OPERATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+\-/*&\\^<>=]").unwrap());
pub(crate) static SINGLE_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[.,;:$%!#&@?]").unwrap());
pub(crate) static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[(){}\[\]]").unwrap());
pub(crate) static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[_A-Za-z]\w*").unwrap());
/// Roku component names (`roArray`, `roSGNode`). Case-sensitive, unlike the word lists.
pub(crate) static ROKU_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ro[A-Z]\w*\b").unwrap());

static BRIGHTSCRIPT: Lazy<KeywordTables> = Lazy::new(|| {
    KeywordTables::compile(&KeywordLists::brightscript())
        .expect("built-in BrightScript tables must compile")
});

/// Errors raised while compiling keyword lists.
#[derive(Debug, Clone)]
pub enum TableError {
    /// A list produced an invalid pattern
    Pattern { list: &'static str, source: regex::Error },
    /// A string delimiter was empty
    EmptyDelimiter,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Pattern { list, source } => {
                write!(f, "Invalid keyword list '{}': {}", list, source)
            }
            TableError::EmptyDelimiter => write!(f, "String delimiters cannot be empty"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Pattern { source, .. } => Some(source),
            TableError::EmptyDelimiter => None,
        }
    }
}

/// A sequence that opens and closes a string literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringDelimiter {
    pub text: String,
    /// Whether `${ ... }` segments inside the string are highlighted separately.
    #[serde(default)]
    pub interpolates: bool,
}

impl StringDelimiter {
    pub fn new(text: impl Into<String>) -> Self {
        StringDelimiter {
            text: text.into(),
            interpolates: false,
        }
    }

    pub fn interpolating(text: impl Into<String>) -> Self {
        StringDelimiter {
            text: text.into(),
            interpolates: true,
        }
    }

    /// Single-character strings end with their line; longer delimiters may span lines.
    pub fn is_single_char(&self) -> bool {
        self.text.chars().count() == 1
    }
}

/// Raw word lists, one per category. Deserializable so a config file can replace them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordLists {
    pub comment_words: Vec<String>,
    pub openers: Vec<String>,
    pub control_openers: Vec<String>,
    pub self_closing_openers: Vec<String>,
    pub middle_control: Vec<String>,
    pub continuations: Vec<String>,
    pub double_closers: Vec<String>,
    pub closers: Vec<String>,
    pub control_closers: Vec<String>,
    pub no_indent: Vec<String>,
    pub word_operators: Vec<String>,
    pub keywords: Vec<String>,
    pub types: Vec<String>,
    pub atoms: Vec<String>,
    pub builtin_functions: Vec<String>,
    pub builtin_objects: Vec<String>,
    pub known_members: Vec<String>,
    pub string_delimiters: Vec<StringDelimiter>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl KeywordLists {
    /// The BrightScript language tables.
    pub fn brightscript() -> Self {
        KeywordLists {
            comment_words: words(&["rem"]),
            openers: words(&["sub", "function"]),
            control_openers: words(&["while", "if", "for", "try"]),
            self_closing_openers: words(&["do"]),
            middle_control: words(&[
                "catch",
                "continue for",
                "continue while",
                "else if",
                "elseif",
                "else",
                "exit for",
                "exit while",
                "to",
                "step",
                "in",
                "then",
                "each",
                "as",
                "return",
                "stop",
                "throw",
            ]),
            continuations: words(&["else if", "elseif", "else", "catch"]),
            double_closers: words(&["end"]),
            closers: words(&["endsub", "endfunction"]),
            control_closers: words(&["next", "endif", "endfor", "endwhile", "endtry"]),
            no_indent: words(&["library"]),
            word_operators: words(&["and", "or", "not", "mod"]),
            keywords: words(&["dim", "print", "goto", "library"]),
            types: words(&[
                "object",
                "dynamic",
                "boolean",
                "string",
                "integer",
                "longinteger",
                "double",
                "float",
                "interface",
                "brsub",
                "void",
            ]),
            atoms: words(&["true", "false", "invalid"]),
            builtin_functions: words(&[
                "box",
                "createobject",
                "getglobalaa",
                "getlastruncompileerror",
                "getlastrunruntimeerror",
                "type",
                "copyfile",
                "createdirectory",
                "deletefile",
                "findmemberfunction",
                "formatdrive",
                "formatjson",
                "getinterface",
                "listdir",
                "matchfiles",
                "movefile",
                "parsejson",
                "readasciifile",
                "rebootsystem",
                "rungarbagecollector",
                "sleep",
                "strtoi",
                "uptime",
                "wait",
                "writeasciifile",
                "asc",
                "chr",
                "instr",
                "lcase",
                "left",
                "len",
                "mid",
                "right",
                "str",
                "stri",
                "string",
                "stringi",
                "substitute",
                "tr",
                "ucase",
                "val",
                "abs",
                "atn",
                "cdbl",
                "cint",
                "cos",
                "csng",
                "exp",
                "fix",
                "int",
                "log",
                "sgn",
                "sin",
                "sqr",
                "tan",
            ]),
            builtin_objects: words(&["global", "m", "super", "LINE_NUM"]),
            known_members: words(&[
                "getdefaultfont",
                "clear",
                "push",
                "next",
                "replace",
                "write",
                "writeline",
                "close",
                "open",
                "state",
                "update",
                "addnew",
                "tostr",
                "toint",
            ]),
            string_delimiters: vec![
                StringDelimiter::new("\""),
                StringDelimiter::interpolating("`"),
            ],
        }
    }
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self::brightscript()
    }
}

/// One compiled word list.
#[derive(Debug, Clone)]
pub struct WordTable {
    pattern: Option<Regex>,
}

impl WordTable {
    /// Compile a list into an anchored whole-word matcher. An empty list never matches.
    pub fn compile(words: &[String]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = words
            .iter()
            .filter(|w| !w.trim().is_empty())
            .map(|w| {
                w.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"[ \t]+")
            })
            .collect();
        let pattern = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?i)^(?:{})\b",
                alternatives.join("|")
            ))?)
        };
        Ok(WordTable { pattern })
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Length in bytes of the entry matching at the start of `text`, if any.
    pub fn match_len(&self, text: &str) -> Option<usize> {
        self.pattern.as_ref()?.find(text).map(|m| m.end())
    }

    pub fn matches_start(&self, text: &str) -> bool {
        self.match_len(text).is_some()
    }
}

/// The compiled, immutable form of [KeywordLists].
#[derive(Debug, Clone)]
pub struct KeywordTables {
    pub comment_words: WordTable,
    pub openers: WordTable,
    pub control_openers: WordTable,
    pub self_closing_openers: WordTable,
    pub middle_control: WordTable,
    pub continuations: WordTable,
    pub double_closers: WordTable,
    pub closers: WordTable,
    pub control_closers: WordTable,
    pub no_indent: WordTable,
    pub word_operators: WordTable,
    pub keywords: WordTable,
    pub types: WordTable,
    pub atoms: WordTable,
    pub builtin_functions: WordTable,
    pub builtin_objects: WordTable,
    pub known_members: WordTable,
    known_member_set: HashSet<String>,
    /// Longest first, so a multi-character delimiter wins over its own prefix.
    delimiters: Vec<StringDelimiter>,
    quote_chars: Vec<char>,
}

impl KeywordTables {
    /// The standard BrightScript tables, compiled once per process.
    pub fn brightscript() -> &'static KeywordTables {
        &BRIGHTSCRIPT
    }

    pub fn compile(lists: &KeywordLists) -> Result<Self, TableError> {
        let table = |list: &'static str, words: &[String]| {
            WordTable::compile(words).map_err(|source| TableError::Pattern { list, source })
        };

        if lists.string_delimiters.iter().any(|d| d.text.is_empty()) {
            return Err(TableError::EmptyDelimiter);
        }
        let mut delimiters = lists.string_delimiters.clone();
        delimiters.sort_by(|a, b| b.text.len().cmp(&a.text.len()));

        let mut quote_chars = vec!['"', '\''];
        for delimiter in &delimiters {
            if let Some(first) = delimiter.text.chars().next() {
                if !quote_chars.contains(&first) {
                    quote_chars.push(first);
                }
            }
        }

        let tables = KeywordTables {
            comment_words: table("comment_words", &lists.comment_words)?,
            openers: table("openers", &lists.openers)?,
            control_openers: table("control_openers", &lists.control_openers)?,
            self_closing_openers: table("self_closing_openers", &lists.self_closing_openers)?,
            middle_control: table("middle_control", &lists.middle_control)?,
            continuations: table("continuations", &lists.continuations)?,
            double_closers: table("double_closers", &lists.double_closers)?,
            closers: table("closers", &lists.closers)?,
            control_closers: table("control_closers", &lists.control_closers)?,
            no_indent: table("no_indent", &lists.no_indent)?,
            word_operators: table("word_operators", &lists.word_operators)?,
            keywords: table("keywords", &lists.keywords)?,
            types: table("types", &lists.types)?,
            atoms: table("atoms", &lists.atoms)?,
            builtin_functions: table("builtin_functions", &lists.builtin_functions)?,
            builtin_objects: table("builtin_objects", &lists.builtin_objects)?,
            known_members: table("known_members", &lists.known_members)?,
            known_member_set: lists
                .known_members
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            delimiters,
            quote_chars,
        };
        log::debug!(
            "compiled keyword tables ({} string delimiters, {} known members)",
            tables.delimiters.len(),
            tables.known_member_set.len()
        );
        Ok(tables)
    }

    /// Case-insensitive lookup in the known member names.
    pub fn is_known_member(&self, word: &str) -> bool {
        self.known_member_set.contains(&word.to_lowercase())
    }

    pub fn string_delimiters(&self) -> &[StringDelimiter] {
        &self.delimiters
    }

    /// Characters that stop the bulk scan inside a string body.
    pub fn is_quote_char(&self, ch: char) -> bool {
        self.quote_chars.contains(&ch)
    }

    /// Whether the trimmed line starts with a word that sits one level out from its block.
    pub fn starts_with_dedent_word(&self, text: &str) -> bool {
        self.closers.matches_start(text)
            || self.control_closers.matches_start(text)
            || self.double_closers.matches_start(text)
            || self.continuations.matches_start(text)
    }
}
