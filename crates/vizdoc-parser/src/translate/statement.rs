//! Line-level PlantUML statement grammar.
//!
//! Each body line is parsed on its own into a [`Statement`]. Lines the
//! grammar does not cover become [`Statement::Other`]; parsing never fails.

use winnow::{
    Parser as _,
    ascii::{Caseless, space0, space1},
    combinator::{alt, delimited, eof, not, opt, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    token::{literal, one_of, take_till, take_while},
};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Flavor of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClassKind {
    Class,
    Abstract,
    Interface,
    Enum,
}

/// One parsed body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement<'src> {
    /// `participant "Long Name" as L`, `actor User`, ...
    Participant { id: &'src str, label: &'src str },
    /// `A -> B : label`, already oriented from sender to receiver.
    /// `A <-> B` keeps its written order and sets `bidirectional`.
    Message {
        from: &'src str,
        to: &'src str,
        label: Option<&'src str>,
        bidirectional: bool,
    },
    /// `class Foo`, `interface Bar`, ...
    Class { kind: ClassKind, name: &'src str },
    /// `Parent <|-- Child` or `Child ..|> Parent`.
    Inheritance {
        parent: &'src str,
        child: &'src str,
        dashed: bool,
    },
    /// Anything else: notes, layout directives, class members, blank lines.
    Other,
}

impl Statement<'_> {
    pub(crate) fn is_sequence(&self) -> bool {
        matches!(self, Self::Participant { .. } | Self::Message { .. })
    }

    pub(crate) fn is_class(&self) -> bool {
        matches!(self, Self::Class { .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum Name<'src> {
    Plain(&'src str),
    Quoted(&'src str),
}

impl<'src> Name<'src> {
    fn text(self) -> &'src str {
        match self {
            Self::Plain(text) | Self::Quoted(text) => text,
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '$')
}

fn identifier<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., is_identifier_char).parse_next(input)
}

/// A `<...>` type argument list, nesting allowed.
fn generic_args(input: &mut Input<'_>) -> IResult<()> {
    let () = delimited(
        '<',
        repeat(0.., alt((take_till(1.., ['<', '>']).void(), generic_args))),
        '>',
    )
    .parse_next(input)?;
    Ok(())
}

/// An identifier with optional type arguments, e.g. `List<T>`.
fn class_name<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    (identifier, opt(generic_args)).take().parse_next(input)
}

fn quoted<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

fn name<'src>(input: &mut Input<'src>) -> IResult<Name<'src>> {
    alt((quoted.map(Name::Quoted), identifier.map(Name::Plain))).parse_next(input)
}

fn rest<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., |_: char| true).parse_next(input)
}

/// `participant`, `actor` and the other participant kinds.
fn participant_keyword<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    terminated(
        alt((
            literal(Caseless("participant")),
            literal(Caseless("actor")),
            literal(Caseless("boundary")),
            literal(Caseless("control")),
            literal(Caseless("entity")),
            literal(Caseless("database")),
            literal(Caseless("collections")),
            literal(Caseless("queue")),
        )),
        space1,
    )
    .parse_next(input)
}

/// A participant declaration. Anything after the name and alias (colors,
/// `order` clauses) is ignored.
///
/// The alias is the id. When exactly one side is quoted, the unquoted side
/// is the id and the quoted side the label.
fn participant<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    participant_keyword.parse_next(input)?;
    let declared = name.parse_next(input)?;
    let alias = opt(preceded((space1, literal("as"), space1), name)).parse_next(input)?;
    rest.parse_next(input)?;

    let (id, label) = match (declared, alias) {
        (declared, None) => (declared.text(), declared.text()),
        (Name::Plain(id), Some(Name::Quoted(label))) => (id, label),
        (declared, Some(alias)) => (alias.text(), declared.text()),
    };
    Ok(Statement::Participant { id, label })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
    Both,
}

/// A `[#color]` or `[bold]` style segment inside an arrow shaft.
fn arrow_style<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited('[', take_till(0.., ']'), ']').parse_next(input)
}

/// One or more dashes, with style segments anywhere after the first.
fn arrow_shaft(input: &mut Input<'_>) -> IResult<()> {
    let () = preceded('-', repeat(0.., alt(('-'.void(), arrow_style.void())))).parse_next(input)?;
    Ok(())
}

/// A lost (`x`) or found (`o`) marker at either end of an arrow. At the
/// target end it must not run into the target's name.
fn arrow_end_marker(input: &mut Input<'_>) -> IResult<char> {
    terminated(one_of(['x', 'o']), not(one_of(is_identifier_char))).parse_next(input)
}

/// `->`, `-->`, `->>`, `<-`, `<->`, `-[#red]>`, `->x`, `o->`, `-\\` and their
/// combinations. At least one head is required.
fn arrow<'src>(input: &mut Input<'src>) -> IResult<Direction> {
    (
        opt(one_of(['x', 'o'])),
        opt(alt((literal("<<"), literal("<")))),
        arrow_shaft,
        opt(alt((
            literal(">>"),
            literal(">"),
            literal("\\\\"),
            literal("\\"),
            literal("//"),
            literal("/"),
        ))),
        opt(arrow_end_marker),
    )
        .verify_map(|(_, left, (), right, _)| match (left.is_some(), right.is_some()) {
            (false, true) => Some(Direction::Forward),
            (true, false) => Some(Direction::Reverse),
            (true, true) => Some(Direction::Both),
            (false, false) => None,
        })
        .parse_next(input)
}

/// Activation markers after the target: `++`, `--`, `**`, `!!`.
fn activation<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., ['+', '-', '*', '!']).parse_next(input)
}

/// `A -> B`, `A --> B`, `B <- A`, `A <-> B` and the styled, lost/found and
/// activating variants, each with an optional `: label`.
fn message<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let left = name.parse_next(input)?;
    let direction = delimited(space0, arrow, space0).parse_next(input)?;
    let right = name.parse_next(input)?;
    (space0, activation, space0).parse_next(input)?;
    let label = opt(preceded(':', rest)).parse_next(input)?;
    eof.parse_next(input)?;

    let (from, to) = match direction {
        Direction::Forward | Direction::Both => (left.text(), right.text()),
        Direction::Reverse => (right.text(), left.text()),
    };
    let label = label.map(str::trim).filter(|label| !label.is_empty());
    Ok(Statement::Message {
        from,
        to,
        label,
        bidirectional: direction == Direction::Both,
    })
}

fn class_keyword<'src>(input: &mut Input<'src>) -> IResult<ClassKind> {
    terminated(
        alt((
            (literal(Caseless("abstract")), space1, literal(Caseless("class"))).value(ClassKind::Abstract),
            literal(Caseless("abstract")).value(ClassKind::Abstract),
            literal(Caseless("class")).value(ClassKind::Class),
            literal(Caseless("interface")).value(ClassKind::Interface),
            literal(Caseless("enum")).value(ClassKind::Enum),
        )),
        space1,
    )
    .parse_next(input)
}

/// A class-like declaration. Stereotypes, bodies and `extends` clauses after
/// the name are ignored.
fn class<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let kind = class_keyword.parse_next(input)?;
    let name = alt((
        quoted,
        terminated(class_name, not(one_of(|c: char| !c.is_whitespace() && c != '{'))),
        take_while(1.., |c: char| !c.is_whitespace() && c != '{'),
    ))
    .parse_next(input)?;
    rest.parse_next(input)?;
    Ok(Statement::Class { kind, name })
}

/// `Parent <|-- Child`, `Child --|> Parent`, and the dashed `..` forms.
fn inheritance<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    let left = alt((quoted, class_name)).parse_next(input)?;
    let (parent_on_left, dashed) = delimited(
        space0,
        alt((
            literal("<|--").value((true, false)),
            literal("<|..").value((true, true)),
            literal("--|>").value((false, false)),
            literal("..|>").value((false, true)),
        )),
        space0,
    )
    .parse_next(input)?;
    let right = alt((quoted, class_name)).parse_next(input)?;
    rest.parse_next(input)?;

    let (parent, child) = if parent_on_left {
        (left, right)
    } else {
        (right, left)
    };
    Ok(Statement::Inheritance {
        parent,
        child,
        dashed,
    })
}

fn statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    alt((message, participant, class, inheritance)).parse_next(input)
}

/// Parses one body line. Marker lines, comments and anything unrecognized
/// yield [`Statement::Other`].
pub(crate) fn parse_line(line: &str) -> Statement<'_> {
    let mut input = line.trim();
    if input.is_empty()
        || input.starts_with('\'')
        || input.starts_with("@start")
        || input.starts_with("@end")
    {
        return Statement::Other;
    }

    statement.parse_next(&mut input).unwrap_or(Statement::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_forms() {
        assert_eq!(
            parse_line("participant Alice"),
            Statement::Participant {
                id: "Alice",
                label: "Alice"
            }
        );
        assert_eq!(
            parse_line("participant \"Long Name\" as L"),
            Statement::Participant {
                id: "L",
                label: "Long Name"
            }
        );
        assert_eq!(
            parse_line("participant L as \"Long Name\""),
            Statement::Participant {
                id: "L",
                label: "Long Name"
            }
        );
        assert_eq!(
            parse_line("actor Bob as B #red"),
            Statement::Participant { id: "B", label: "Bob" }
        );
        assert_eq!(
            parse_line("  database Db"),
            Statement::Participant { id: "Db", label: "Db" }
        );
    }

    #[test]
    fn test_keyword_prefix_is_not_a_declaration() {
        assert_eq!(parse_line("participants are listed"), Statement::Other);
    }

    #[test]
    fn test_message_forms() {
        assert_eq!(
            parse_line("Alice -> Bob: Hi"),
            Statement::Message {
                from: "Alice",
                to: "Bob",
                label: Some("Hi"),
                bidirectional: false
            }
        );
        assert_eq!(
            parse_line("Alice-->Bob"),
            Statement::Message {
                from: "Alice",
                to: "Bob",
                label: None,
                bidirectional: false
            }
        );
        assert_eq!(
            parse_line("A ->> B :  async call "),
            Statement::Message {
                from: "A",
                to: "B",
                label: Some("async call"),
                bidirectional: false
            }
        );
        assert_eq!(
            parse_line("\"Web Server\" -> Db : query"),
            Statement::Message {
                from: "Web Server",
                to: "Db",
                label: Some("query"),
                bidirectional: false
            }
        );
    }

    #[test]
    fn test_reverse_message_is_swapped() {
        assert_eq!(
            parse_line("Bob <- Alice : reply"),
            Statement::Message {
                from: "Alice",
                to: "Bob",
                label: Some("reply"),
                bidirectional: false
            }
        );
        assert_eq!(
            parse_line("Bob <-- Alice"),
            Statement::Message {
                from: "Alice",
                to: "Bob",
                label: None,
                bidirectional: false
            }
        );
    }

    #[test]
    fn test_empty_message_label_is_none() {
        assert_eq!(
            parse_line("A -> B :"),
            Statement::Message {
                from: "A",
                to: "B",
                label: None,
                bidirectional: false
            }
        );
    }

    #[test]
    fn test_message_with_trailing_garbage_is_other() {
        assert_eq!(parse_line("A -> B C"), Statement::Other);
    }

    #[test]
    fn test_class_declarations() {
        assert_eq!(
            parse_line("class Car {"),
            Statement::Class {
                kind: ClassKind::Class,
                name: "Car"
            }
        );
        assert_eq!(
            parse_line("class Car{"),
            Statement::Class {
                kind: ClassKind::Class,
                name: "Car"
            }
        );
        assert_eq!(
            parse_line("abstract class Shape"),
            Statement::Class {
                kind: ClassKind::Abstract,
                name: "Shape"
            }
        );
        assert_eq!(
            parse_line("abstract Base"),
            Statement::Class {
                kind: ClassKind::Abstract,
                name: "Base"
            }
        );
        assert_eq!(
            parse_line("interface Drawable <<stereotype>>"),
            Statement::Class {
                kind: ClassKind::Interface,
                name: "Drawable"
            }
        );
        assert_eq!(
            parse_line("enum Color"),
            Statement::Class {
                kind: ClassKind::Enum,
                name: "Color"
            }
        );
    }

    #[test]
    fn test_inheritance_arrows() {
        assert_eq!(
            parse_line("Vehicle <|-- Car"),
            Statement::Inheritance {
                parent: "Vehicle",
                child: "Car",
                dashed: false
            }
        );
        assert_eq!(
            parse_line("Car --|> Vehicle"),
            Statement::Inheritance {
                parent: "Vehicle",
                child: "Car",
                dashed: false
            }
        );
        assert_eq!(
            parse_line("Drawable <|.. Circle"),
            Statement::Inheritance {
                parent: "Drawable",
                child: "Circle",
                dashed: true
            }
        );
        assert_eq!(
            parse_line("Circle ..|> Drawable : implements"),
            Statement::Inheritance {
                parent: "Drawable",
                child: "Circle",
                dashed: true
            }
        );
    }

    #[test]
    fn test_inheritance_is_not_a_message() {
        assert!(!parse_line("A <|-- B").is_sequence());
        assert!(!parse_line("B --|> A").is_sequence());
    }

    #[test]
    fn test_markers_comments_and_blank_lines() {
        for line in ["@startuml", "@enduml", "' A -> B", "", "   ", "note left: x", "}"] {
            assert_eq!(parse_line(line), Statement::Other, "{line:?}");
        }
    }

    fn sent<'a>(from: &'a str, to: &'a str, label: Option<&'a str>) -> Statement<'a> {
        Statement::Message {
            from,
            to,
            label,
            bidirectional: false,
        }
    }

    #[test]
    fn test_styled_arrows() {
        assert_eq!(
            parse_line("Alice -[#red]> Bob : hi"),
            sent("Alice", "Bob", Some("hi"))
        );
        assert_eq!(
            parse_line("Alice -[#blue]-> Bob"),
            sent("Alice", "Bob", None)
        );
        assert_eq!(
            parse_line("Bob <-[bold]- Alice : back"),
            sent("Alice", "Bob", Some("back"))
        );
    }

    #[test]
    fn test_lost_and_found_arrows() {
        assert_eq!(parse_line("Alice ->x Bob : hi"), sent("Alice", "Bob", Some("hi")));
        assert_eq!(parse_line("Alice ->o Bob"), sent("Alice", "Bob", None));
        assert_eq!(parse_line("Alice o-> Bob"), sent("Alice", "Bob", None));
        assert_eq!(parse_line("Alice -> xavier"), sent("Alice", "xavier", None));
    }

    #[test]
    fn test_half_arrows() {
        assert_eq!(parse_line(r"Alice -\\ Bob"), sent("Alice", "Bob", None));
        assert_eq!(parse_line("Alice -// Bob : async"), sent("Alice", "Bob", Some("async")));
    }

    #[test]
    fn test_bidirectional_arrow() {
        assert_eq!(
            parse_line("Alice <-> Bob : sync"),
            Statement::Message {
                from: "Alice",
                to: "Bob",
                label: Some("sync"),
                bidirectional: true
            }
        );
    }

    #[test]
    fn test_activation_markers() {
        assert_eq!(parse_line("Alice -> Bob ++ : hi"), sent("Alice", "Bob", Some("hi")));
        assert_eq!(parse_line("Bob --> Alice -- : done"), sent("Bob", "Alice", Some("done")));
        assert_eq!(parse_line("Alice -> Bob **"), sent("Alice", "Bob", None));
        assert_eq!(parse_line("Alice -> Bob !!"), sent("Alice", "Bob", None));
    }

    #[test]
    fn test_arrow_without_head_is_other() {
        assert_eq!(parse_line("Alice -- Bob"), Statement::Other);
        assert_eq!(parse_line("Alice -[#red]- Bob"), Statement::Other);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            parse_line("Participant Alice"),
            Statement::Participant {
                id: "Alice",
                label: "Alice"
            }
        );
        assert_eq!(
            parse_line("ACTOR User"),
            Statement::Participant {
                id: "User",
                label: "User"
            }
        );
        assert_eq!(
            parse_line("Class Car"),
            Statement::Class {
                kind: ClassKind::Class,
                name: "Car"
            }
        );
        assert_eq!(
            parse_line("Abstract Class Shape"),
            Statement::Class {
                kind: ClassKind::Abstract,
                name: "Shape"
            }
        );
    }

    #[test]
    fn test_keyword_named_participant_sends_messages() {
        assert_eq!(
            parse_line("Queue -> Worker : job"),
            sent("Queue", "Worker", Some("job"))
        );
        assert_eq!(parse_line("Class -> B"), sent("Class", "B", None));
    }

    #[test]
    fn test_generic_class_names() {
        assert_eq!(
            parse_line("class Map<K, V> {"),
            Statement::Class {
                kind: ClassKind::Class,
                name: "Map<K, V>"
            }
        );
        assert_eq!(
            parse_line("List<T> <|-- ArrayList<T>"),
            Statement::Inheritance {
                parent: "List<T>",
                child: "ArrayList<T>",
                dashed: false
            }
        );
        assert_eq!(
            parse_line("Cache<K, List<V>> ..|> Store<K>"),
            Statement::Inheritance {
                parent: "Store<K>",
                child: "Cache<K, List<V>>",
                dashed: true
            }
        );
    }
}
