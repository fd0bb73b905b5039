//! Rule-language document model and its one serializer.
//!
//! Generators build [`Script`]s out of [`RuleBlock`]s and decorative sections,
//! and only [`Script::render`] knows the wire syntax:
//!
//! ```text
//! ##f$Name##
//! // comment
//! WHEN <condition> <action> FORCE
//! WHEN Others <action> FORCE
//!
//! ```
//!
//! A [`RuleBlock`] can only be finished through
//! [`RuleBlockBuilder::otherwise`], so every block ends in exactly one
//! `WHEN Others` clause. [`Formula`] sections are expressions and have none.

use std::fmt;

const BANNER_RULE: &str =
    "//*****************************************************************************";

// ---------------------------------------------------------------------------
// Actions and clauses
// ---------------------------------------------------------------------------

/// Right-hand side of a clause, minus the trailing `FORCE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action(String);

impl Action {
    /// `RETURN <value>`: preflop decisions and boolean predicates.
    pub fn ret(value: impl fmt::Display) -> Self {
        Action(format!("RETURN {value}"))
    }

    pub fn return_true() -> Self {
        Action::ret("true")
    }

    pub fn return_false() -> Self {
        Action::ret("false")
    }

    pub fn check() -> Self {
        Action("Check".into())
    }

    pub fn call() -> Self {
        Action("Call".into())
    }

    pub fn fold() -> Self {
        Action("Fold".into())
    }

    pub fn raise_pot() -> Self {
        Action("RaisePot".into())
    }

    /// `RaiseBy <pct>%` of the pot.
    pub fn raise_by(pct: impl fmt::Display) -> Self {
        Action(format!("RaiseBy {pct}%"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub condition: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyLine {
    Comment(String),
    Clause(Clause),
    Blank,
}

// ---------------------------------------------------------------------------
// Rule blocks
// ---------------------------------------------------------------------------

/// A named rule function: ordered clauses, first match wins, then a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    name: String,
    body: Vec<BodyLine>,
    fallback: Action,
}

impl RuleBlock {
    pub fn builder(name: impl Into<String>) -> RuleBlockBuilder {
        RuleBlockBuilder { name: name.into(), body: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Conditional clauses in evaluation order (the fallback is not included).
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.body.iter().filter_map(|line| match line {
            BodyLine::Clause(c) => Some(c),
            _ => None,
        })
    }

    pub fn fallback(&self) -> &Action {
        &self.fallback
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(&format!("##{}##\n", self.name));
        for line in &self.body {
            match line {
                BodyLine::Comment(text) => out.push_str(&format!("// {text}\n")),
                BodyLine::Clause(c) => {
                    out.push_str(&format!("WHEN {} {} FORCE\n", c.condition, c.action))
                }
                BodyLine::Blank => out.push('\n'),
            }
        }
        out.push_str(&format!("WHEN Others {} FORCE\n\n", self.fallback));
    }
}

#[derive(Debug, Clone)]
pub struct RuleBlockBuilder {
    name: String,
    body: Vec<BodyLine>,
}

impl RuleBlockBuilder {
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.body.push(BodyLine::Comment(text.into()));
        self
    }

    pub fn blank(mut self) -> Self {
        self.body.push(BodyLine::Blank);
        self
    }

    pub fn when(mut self, condition: impl Into<String>, action: Action) -> Self {
        self.body.push(BodyLine::Clause(Clause { condition: condition.into(), action }));
        self
    }

    /// Add a clause only when `include` holds.
    pub fn when_if(self, include: bool, condition: impl Into<String>, action: Action) -> Self {
        if include {
            self.when(condition, action)
        } else {
            self
        }
    }

    /// Close the block with its unconditional fallback.
    pub fn otherwise(self, action: Action) -> RuleBlock {
        RuleBlock { name: self.name, body: self.body, fallback: action }
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// A named expression function (`##f$IsolateSize##` / `Calls * 1 + 2.5`).
///
/// Formulas evaluate to a number rather than choosing an action, so they are
/// the one kind of `##name##` section that has no `WHEN Others` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub name: String,
    pub comments: Vec<String>,
    pub expression: String,
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    /// Star-ruled comment box. `padded` adds an empty `//` line inside each rule.
    Banner { lines: Vec<String>, padded: bool },
    Comment(String),
    Block(RuleBlock),
    Formula(Formula),
    Footer(String),
}

/// An ordered rule document: one street, or one generator's share of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    sections: Vec<Section>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Section banner with an empty `//` line inside each star rule.
    pub fn banner<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        self.sections.push(Section::Banner { lines, padded: true });
    }

    /// Compact banner: star rules directly around the text.
    pub fn tight_banner(&mut self, text: impl Into<String>) {
        self.sections.push(Section::Banner { lines: vec![text.into()], padded: false });
    }

    /// A free-standing `// text` line between blocks.
    pub fn comment(&mut self, text: impl Into<String>) {
        self.sections.push(Section::Comment(text.into()));
    }

    pub fn push(&mut self, block: RuleBlock) {
        self.sections.push(Section::Block(block));
    }

    pub fn push_formula(&mut self, formula: Formula) {
        self.sections.push(Section::Formula(formula));
    }

    /// Closing banner. Rendered without a trailing newline.
    pub fn footer(&mut self, text: impl Into<String>) {
        self.sections.push(Section::Footer(text.into()));
    }

    pub fn append(&mut self, other: Script) {
        self.sections.extend(other.sections);
    }

    pub fn blocks(&self) -> impl Iterator<Item = &RuleBlock> {
        self.sections.iter().filter_map(|s| match s {
            Section::Block(b) => Some(b),
            _ => None,
        })
    }

    pub fn find_block(&self, name: &str) -> Option<&RuleBlock> {
        self.blocks().find(|b| b.name() == name)
    }

    pub fn formulas(&self) -> impl Iterator<Item = &Formula> {
        self.sections.iter().filter_map(|s| match s {
            Section::Formula(f) => Some(f),
            _ => None,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            match section {
                Section::Banner { lines, padded } => {
                    render_banner(&mut out, lines, *padded);
                    out.push('\n');
                }
                Section::Comment(text) => out.push_str(&format!("// {text}\n\n")),
                Section::Block(block) => block.render_into(&mut out),
                Section::Formula(f) => {
                    out.push_str(&format!("##{}##\n", f.name));
                    for c in &f.comments {
                        out.push_str(&format!("// {c}\n"));
                    }
                    out.push_str(&format!("{}\n\n", f.expression));
                }
                Section::Footer(text) => {
                    render_banner(&mut out, std::slice::from_ref(text), true);
                    out.truncate(out.trim_end_matches('\n').len());
                }
            }
        }
        out
    }
}

fn render_banner(out: &mut String, lines: &[String], padded: bool) {
    out.push_str(BANNER_RULE);
    out.push('\n');
    if padded {
        out.push_str("//\n");
    }
    for line in lines {
        if line.is_empty() {
            out.push_str("//\n");
        } else {
            out.push_str(&format!("// {line}\n"));
        }
    }
    if padded {
        out.push_str("//\n");
    }
    out.push_str(BANNER_RULE);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RuleBlock {
        RuleBlock::builder("f$Sample")
            .comment("0 = Fold, 1 = Call")
            .when("handrank169 <= 20", Action::ret(1))
            .blank()
            .when("InButton", Action::raise_by("50"))
            .otherwise(Action::ret(0))
    }

    #[test]
    fn block_renders_header_clauses_and_fallback() {
        let mut script = Script::new();
        script.push(sample());
        assert_eq!(
            script.render(),
            "##f$Sample##\n\
             // 0 = Fold, 1 = Call\n\
             WHEN handrank169 <= 20 RETURN 1 FORCE\n\
             \n\
             WHEN InButton RaiseBy 50% FORCE\n\
             WHEN Others RETURN 0 FORCE\n\n"
        );
    }

    #[test]
    fn clauses_exclude_comments_blanks_and_fallback() {
        let block = sample();
        assert_eq!(block.clauses().count(), 2);
        assert_eq!(block.fallback(), &Action::ret(0));
    }

    #[test]
    fn conditional_clause_is_skipped_when_excluded() {
        let block = RuleBlock::builder("f$X")
            .when_if(false, "InButton", Action::call())
            .otherwise(Action::fold());
        assert_eq!(block.clauses().count(), 0);
    }

    #[test]
    fn banner_and_footer_layout() {
        let mut script = Script::new();
        script.banner(["FLOP STRATEGY", "", "Generated"]);
        script.footer("END");
        let text = script.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], BANNER_RULE);
        assert_eq!(lines[1], "//");
        assert_eq!(lines[2], "// FLOP STRATEGY");
        assert_eq!(lines[3], "//");
        assert_eq!(lines[4], "// Generated");
        assert_eq!(lines[6], BANNER_RULE);
        assert_eq!(lines[7], "");
        assert!(text.ends_with(BANNER_RULE), "footer must not end in a newline");
    }

    #[test]
    fn tight_banner_has_no_padding() {
        let mut script = Script::new();
        script.tight_banner("Helper functions");
        assert_eq!(
            script.render(),
            format!("{BANNER_RULE}\n// Helper functions\n{BANNER_RULE}\n\n")
        );
    }

    #[test]
    fn formula_renders_expression_body() {
        let mut script = Script::new();
        script.push_formula(Formula {
            name: "f$IsolateSize".into(),
            comments: vec!["Isolation size".into()],
            expression: "Calls * 1 + 2.5".into(),
        });
        assert_eq!(script.render(), "##f$IsolateSize##\n// Isolation size\nCalls * 1 + 2.5\n\n");
        assert_eq!(script.formulas().count(), 1);
        assert_eq!(script.blocks().count(), 0);
    }
}
