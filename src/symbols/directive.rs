//! Declarative description of where a payload carries symbols

use std::borrow::Cow;

use super::snapshot::{AssetClass, Direction};

/// Where a symbol lives inside a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolRule {
    /// String (or array of strings) value of any member with this name
    Field(Cow<'static, str>),
    /// Keys of the root mapping
    RootKeys,
    /// Keys of any mapping stored under a member with this name
    KeysOf(Cow<'static, str>),
    /// String elements of the root sequence
    Elements,
    /// First element of every sequence nested in the root sequence
    TupleHeads,
}

/// Which string leaves are parsed into JSON numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NumericRule {
    /// Leave every string as is
    #[default]
    None,
    /// String values of members with these names
    Fields(Vec<Cow<'static, str>>),
    /// Every string leaf that was not converted as a symbol
    Everywhere,
}

/// Traversal directive for the rewriter.
///
/// Built per endpoint, since a string in a response could be a symbol, a
/// hash or a number and the shape alone does not tell which.
///
/// ```
/// use hyperliquid_info::symbols::{Directive, NumericRule};
///
/// let directive = Directive::to_display()
///     .symbol_field("coin")
///     .numeric_field("px");
/// assert!(directive.is_symbol_field("coin"));
/// assert_eq!(directive.numeric(), &NumericRule::Fields(vec!["px".into()]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    direction: Direction,
    class: Option<AssetClass>,
    symbols: Vec<SymbolRule>,
    numeric: NumericRule,
}

impl Directive {
    /// Empty directive in the given direction
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            class: None,
            symbols: Vec::new(),
            numeric: NumericRule::None,
        }
    }

    /// Empty directive converting internal identifiers to display symbols
    pub fn to_display() -> Self {
        Self::new(Direction::ToDisplay)
    }

    /// Empty directive converting display symbols to internal identifiers
    pub fn to_internal() -> Self {
        Self::new(Direction::ToInternal)
    }

    /// Read-path default: `coin` and `symbol` members hold symbols
    pub fn coins() -> Self {
        Self::to_display().symbol_field("coin").symbol_field("symbol")
    }

    /// Restrict lookups to one asset class
    pub fn within(mut self, class: AssetClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn symbol_field(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.symbols.push(SymbolRule::Field(name.into()));
        self
    }

    pub fn root_keys(mut self) -> Self {
        self.symbols.push(SymbolRule::RootKeys);
        self
    }

    pub fn keys_of(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.symbols.push(SymbolRule::KeysOf(name.into()));
        self
    }

    pub fn elements(mut self) -> Self {
        self.symbols.push(SymbolRule::Elements);
        self
    }

    pub fn tuple_heads(mut self) -> Self {
        self.symbols.push(SymbolRule::TupleHeads);
        self
    }

    /// Parse the string value of members named `name` into numbers.
    ///
    /// Has no effect once [`Directive::numeric_everywhere`] is set.
    pub fn numeric_field(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        match self.numeric {
            NumericRule::None => self.numeric = NumericRule::Fields(vec![name.into()]),
            NumericRule::Fields(ref mut names) => names.push(name.into()),
            NumericRule::Everywhere => {}
        }
        self
    }

    pub fn numeric_everywhere(mut self) -> Self {
        self.numeric = NumericRule::Everywhere;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn class(&self) -> Option<AssetClass> {
        self.class
    }

    pub fn symbols(&self) -> &[SymbolRule] {
        &self.symbols
    }

    pub fn numeric(&self) -> &NumericRule {
        &self.numeric
    }

    /// Whether the directive converts nothing at all
    pub fn is_noop(&self) -> bool {
        self.symbols.is_empty() && self.numeric == NumericRule::None
    }

    pub fn is_symbol_field(&self, name: &str) -> bool {
        self.symbols
            .iter()
            .any(|rule| matches!(rule, SymbolRule::Field(field) if field == name))
    }

    pub fn has_symbol_keys_under(&self, name: &str) -> bool {
        self.symbols
            .iter()
            .any(|rule| matches!(rule, SymbolRule::KeysOf(field) if field == name))
    }

    pub fn has_rule(&self, rule: &SymbolRule) -> bool {
        self.symbols.contains(rule)
    }

    pub fn is_numeric_field(&self, name: &str) -> bool {
        match &self.numeric {
            NumericRule::None => false,
            NumericRule::Fields(names) => names.iter().any(|field| field == name),
            NumericRule::Everywhere => true,
        }
    }
}

impl Default for Directive {
    fn default() -> Self {
        Self::coins()
    }
}
