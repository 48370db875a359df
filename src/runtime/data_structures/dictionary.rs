use crate::lang::{
    source_buffer::SourceLocation,
    tokenizing::{BlockBody, Token},
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The information stored in the word dictionary for each user defined word.
#[derive(Clone, Debug)]
pub struct WordInfo {
    /// The location in the source code where the word was defined.
    pub location: SourceLocation,

    /// The lower-cased name of the word.
    pub name: String,

    /// The tokens executed when the word is invoked.  Stored exactly as written, nested blocks
    /// included.
    pub body: BlockBody,
}

impl WordInfo {
    pub fn new(location: SourceLocation, name: String, body: BlockBody) -> WordInfo {
        WordInfo {
            location,
            name,
            body,
        }
    }
}

/// Render the word as `<name: body tokens>`.
impl Display for WordInfo {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let body: Vec<String> = self.body.iter().map(Token::to_string).collect();

        write!(f, "<{}: {}>", self.name, body.join(" "))
    }
}

/// The dictionary of user defined words.  Names are case-insensitive and at most one body is kept
/// per name.  Defining a name again replaces the old body outright, but the word keeps it's place
/// in the listing order.
///
/// Words are never removed.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    /// The words in the order their names were first defined.
    words: Vec<WordInfo>,

    /// Lookup from lower-cased name to the word's index in the list.
    index: HashMap<String, usize>,
}

/// The listing used by `.words`: `[<double: dup +>, <square: dup *>]`.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let listing: Vec<String> = self.words.iter().map(WordInfo::to_string).collect();

        write!(formatter, "[{}]", listing.join(", "))
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a new word, or replace the body of an existing one.  Returns true if the word
    /// already existed.
    pub fn insert(&mut self, name: &str, location: SourceLocation, body: BlockBody) -> bool {
        let name = name.to_lowercase();

        match self.index.get(&name) {
            Some(&found) => {
                self.words[found] = WordInfo::new(location, name, body);
                true
            }

            None => {
                let _ = self.index.insert(name.clone(), self.words.len());
                self.words.push(WordInfo::new(location, name, body));
                false
            }
        }
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.index
            .get(&name.to_lowercase())
            .map(|&found| &self.words[found])
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
