//! Test program templates.
//!
//! A template is C source text with `@SLOT@` placeholders. Braces are left
//! alone so templates can be written as ordinary C.

/// An immutable source template rendered once per trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestProgram {
    name: &'static str,
    template: &'static str,
}

impl TestProgram {
    /// Create a named template.
    #[must_use]
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self { name, template }
    }

    /// Short label used in logs.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw template text, placeholders included.
    pub const fn template(&self) -> &'static str {
        self.template
    }

    /// Fill every `@SLOT@` occurrence with its value.
    ///
    /// Slots not named in `slots` are left untouched.
    pub fn render(&self, slots: &[(&str, &str)]) -> String {
        slots
            .iter()
            .fold(self.template.to_string(), |text, (slot, value)| {
                text.replace(&format!("@{slot}@"), value)
            })
    }

    /// Render a template that has no slots.
    pub fn source(&self) -> String {
        self.render(&[])
    }
}
