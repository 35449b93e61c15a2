use serde::{de::Error, Deserialize, Deserializer};
use unicode_segmentation::UnicodeSegmentation;

use super::grapheme;

const DANGLING_ESCAPE: &str = "expected another character after an escape character";
const DANGLING_MODIFIER: &str = "modifier must follow a literal or a class";

#[derive(Debug, PartialEq, Eq)]
enum CharClass {
    Grapheme(String),
    Whitespace, // %s
    Word,       // %w
    Newline,    // %n
}

impl CharClass {
    fn contains(&self, grapheme: &str) -> bool {
        match self {
            CharClass::Grapheme(class_grapheme) => grapheme == class_grapheme,
            CharClass::Whitespace => grapheme::is_whitespace(grapheme),
            CharClass::Word => grapheme::is_word(grapheme),
            CharClass::Newline => matches!(grapheme, "\n" | "\r\n" | "\r"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Atom {
    Text(String),
    Class(CharClass),
    Set {
        members: Vec<CharClass>,
        is_negated: bool,
    },
    LineEnd, // $
}

impl Atom {
    // Returns where a single occurrence of the atom ends.
    fn match_once(&self, text: &str, start: usize) -> Option<usize> {
        match self {
            Atom::Text(literal) => {
                let end = start + literal.len();

                (text.get(start..end) == Some(literal.as_str()) && grapheme::is_boundary(end, text))
                    .then_some(end)
            }
            Atom::Class(class) => {
                let grapheme = grapheme::get(start, text)?;

                class.contains(grapheme).then_some(start + grapheme.len())
            }
            Atom::Set {
                members,
                is_negated,
            } => {
                let grapheme = grapheme::get(start, text)?;
                let is_member = members.iter().any(|member| member.contains(grapheme));

                (is_member != *is_negated).then_some(start + grapheme.len())
            }
            Atom::LineEnd => grapheme::is_line_end(start, text).then_some(start),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    OneOrMore,  // +
    ZeroOrMore, // *
}

#[derive(Debug, PartialEq, Eq)]
struct Step {
    atom: Atom,
    repeat: Repeat,
}

// A rule pattern compiled into steps. Runs of plain literals are joined so
// delimiters like `"""` are compared in one go.
#[derive(Debug)]
pub struct Pattern {
    steps: Vec<Step>,
}

impl Pattern {
    pub fn parse(code: &str) -> Result<Self, &'static str> {
        let mut steps: Vec<Step> = Vec::new();
        let mut graphemes = code.graphemes(true);

        while let Some(grapheme) = graphemes.next() {
            let atom = match grapheme {
                "%" => match Self::parse_escape(graphemes.next())? {
                    CharClass::Grapheme(literal) => Atom::Text(literal),
                    class => Atom::Class(class),
                },
                "[" => Self::parse_set(&mut graphemes)?,
                "$" => Atom::LineEnd,
                "+" | "*" => {
                    let Some(step) = steps.last_mut() else {
                        return Err(DANGLING_MODIFIER);
                    };

                    if step.repeat != Repeat::Once || step.atom == Atom::LineEnd {
                        return Err(DANGLING_MODIFIER);
                    }

                    step.repeat = if grapheme == "+" {
                        Repeat::OneOrMore
                    } else {
                        Repeat::ZeroOrMore
                    };

                    continue;
                }
                _ => Atom::Text(grapheme.to_owned()),
            };

            steps.push(Step {
                atom,
                repeat: Repeat::Once,
            });
        }

        Ok(Self {
            steps: Self::join_text(steps),
        })
    }

    fn parse_escape(grapheme: Option<&str>) -> Result<CharClass, &'static str> {
        match grapheme {
            Some("s") => Ok(CharClass::Whitespace),
            Some("w") => Ok(CharClass::Word),
            Some("n") => Ok(CharClass::Newline),
            Some(grapheme) => Ok(CharClass::Grapheme(grapheme.to_owned())),
            None => Err(DANGLING_ESCAPE),
        }
    }

    fn parse_set<'a>(graphemes: &mut impl Iterator<Item = &'a str>) -> Result<Atom, &'static str> {
        let mut members = Vec::new();
        let mut is_negated = false;
        let mut is_first = true;

        while let Some(grapheme) = graphemes.next() {
            match grapheme {
                "^" if is_first => is_negated = true,
                "]" => {
                    return Ok(Atom::Set {
                        members,
                        is_negated,
                    })
                }
                "%" => members.push(Self::parse_escape(graphemes.next())?),
                _ => members.push(CharClass::Grapheme(grapheme.to_owned())),
            }

            is_first = false;
        }

        Err("unterminated class")
    }

    fn join_text(steps: Vec<Step>) -> Vec<Step> {
        let mut joined: Vec<Step> = Vec::with_capacity(steps.len());

        for step in steps {
            if let (
                Some(Step {
                    atom: Atom::Text(last_literal),
                    repeat: Repeat::Once,
                }),
                Step {
                    atom: Atom::Text(literal),
                    repeat: Repeat::Once,
                },
            ) = (joined.last_mut(), &step)
            {
                last_literal.push_str(literal);
                continue;
            }

            joined.push(step);
        }

        joined
    }

    // Returns the end of the match anchored at `start`.
    pub fn match_text(&self, text: &str, start: usize) -> Option<usize> {
        Self::match_steps(&self.steps, text, start)
    }

    fn match_steps(steps: &[Step], text: &str, start: usize) -> Option<usize> {
        let Some((step, remaining_steps)) = steps.split_first() else {
            return Some(start);
        };

        if step.repeat == Repeat::Once {
            let end = step.atom.match_once(text, start)?;

            return Self::match_steps(remaining_steps, text, end);
        }

        let mut ends = Vec::new();

        if step.repeat == Repeat::ZeroOrMore {
            ends.push(start);
        }

        let mut i = start;

        while let Some(end) = step.atom.match_once(text, i) {
            ends.push(end);
            i = end;
        }

        // Greedy: the longest repetition that lets the rest match wins.
        ends.into_iter()
            .rev()
            .find_map(|end| Self::match_steps(remaining_steps, text, end))
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Pattern, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code: String = Deserialize::deserialize(deserializer)?;

        Pattern::parse(&code).map_err(D::Error::custom)
    }
}
