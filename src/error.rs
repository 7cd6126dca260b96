use thiserror::Error;

/// Result type used throughout xmlcleaner.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument or precondition was invalid: an empty prefix, an unknown
    /// encoding, no document set, no default namespace.
    DomainViolation,
    /// The document is not well-formed XML.
    MalformedInput,
    /// The copy-transform could not be built or applied, or the tidy
    /// collaborator failed.
    TransformError,
}

/// Xmlcleaner errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A prefix argument was the empty string.
    #[error("prefix can not be empty")]
    EmptyPrefix,
    /// The character encoding is not one of the known encodings.
    #[error("unknown character encoding: {0}")]
    UnknownEncoding(String),
    /// No document was set, or the stored document is empty.
    #[error("XML must be set before it can be used")]
    NoXml,
    /// The document does not declare a default namespace.
    #[error("default namespace is not declared")]
    NoDefaultNamespace,

    /// The underlying tokenizer rejected the document.
    #[error("XML parser error: {0}")]
    Parser(#[from] xmlparser::Error),
    /// An entity was opened with `&` but never closed with `;`.
    #[error("unclosed entity: {0}")]
    UnclosedEntity(String),
    /// An entity that is neither predefined nor a character reference.
    #[error("invalid entity: {0}")]
    InvalidEntity(String),
    /// A prefix is used in a name without being declared in scope.
    #[error("unknown prefix: {0}")]
    UnknownPrefix(String),
    /// A prefixed namespace declaration with an empty URI.
    #[error("empty namespace declared for prefix: {0}")]
    EmptyNamespace(String),
    /// A close tag does not match the element it closes.
    #[error("invalid close tag: expected </{expected}>, found </{found}>")]
    InvalidCloseTag { expected: String, found: String },
    /// The document ended while an element was still open.
    #[error("unclosed tag: <{0}>")]
    UnclosedTag(String),
    /// The document has no document element.
    #[error("document has no document element")]
    NoDocumentElement,
    /// The document has more than one top-level element.
    #[error("document has more than one document element")]
    MultipleDocumentElements,
    /// Non-whitespace text outside of the document element.
    #[error("text outside of the document element")]
    TextOutsideDocumentElement,
    /// An element carries the same attribute twice.
    #[error("duplicate attribute: {0}")]
    DuplicateAttribute(String),
    /// Input bytes could not be decoded in the detected encoding.
    #[error("document can not be decoded as {0}")]
    Undecodable(String),

    /// The match predicate can not be turned into a transform.
    #[error("invalid match predicate: {0}")]
    InvalidPredicate(String),
    /// The match predicate uses a prefix the document does not declare.
    #[error("prefix is not declared in the document: {0}")]
    UndeclaredPrefix(String),
    /// The transform would remove the document element itself.
    #[error("transform removes the document element")]
    DocumentElementRemoved,
    /// The tidy collaborator failed.
    #[error("tidy failed: {0}")]
    TidyFailed(String),
}

impl Error {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            EmptyPrefix | UnknownEncoding(_) | NoXml | NoDefaultNamespace => {
                ErrorKind::DomainViolation
            }
            Parser(_)
            | UnclosedEntity(_)
            | InvalidEntity(_)
            | UnknownPrefix(_)
            | EmptyNamespace(_)
            | InvalidCloseTag { .. }
            | UnclosedTag(_)
            | NoDocumentElement
            | MultipleDocumentElements
            | TextOutsideDocumentElement
            | DuplicateAttribute(_)
            | Undecodable(_) => ErrorKind::MalformedInput,
            InvalidPredicate(_) | UndeclaredPrefix(_) | DocumentElementRemoved | TidyFailed(_) => {
                ErrorKind::TransformError
            }
        }
    }
}
