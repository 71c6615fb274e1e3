//! `§TOKEN§` placeholder substitution.
//!
//! Placeholders are an uppercase name between section signs, e.g.
//! `§ENGINE_JS§`. Substitution is one left-to-right pass over the template:
//! inserted values are never scanned again, so a diagram that happens to
//! contain `§ENGINE_JS§` is embedded as is. Placeholders without a value are
//! left untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::AssembleError;

/// Opening marker of the replaceable render stub.
pub const STUB_BEGIN: &str = "§RENDER_STUB_BEGIN§";
/// Closing marker of the replaceable render stub.
pub const STUB_END: &str = "§RENDER_STUB_END§";

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)§RENDER_STUB_BEGIN§.*?§RENDER_STUB_END§|§([A-Z][A-Z0-9_]*)§")
        .expect("TOKEN_RE regex pattern is valid")
});

/// Values for one substitution pass.
#[derive(Debug, Default)]
pub struct Bindings<'a> {
    values: Vec<(&'static str, &'a str)>,
    stub: Option<&'a str>,
}

impl<'a> Bindings<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `§name§` to `value`.
    pub fn bind(mut self, name: &'static str, value: &'a str) -> Self {
        self.values.push((name, value));
        self
    }

    /// Replaces the whole stub region, markers included, with `content`.
    pub fn stub(mut self, content: &'a str) -> Self {
        self.stub = Some(content);
        self
    }

    fn value(&self, name: &str) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| *value)
    }
}

/// Checks that `text` carries every placeholder in `required`.
pub fn require(
    text: &str,
    template: &str,
    required: &[&'static str],
) -> Result<(), AssembleError> {
    for token in required {
        if !text.contains(&format!("§{token}§")) {
            return Err(AssembleError::MissingPlaceholder {
                template: template.to_string(),
                placeholder: token,
            });
        }
    }
    Ok(())
}

/// Checks that `text` carries a well-formed stub region.
pub fn require_stub(text: &str, template: &str) -> Result<(), AssembleError> {
    let missing = |placeholder| AssembleError::MissingPlaceholder {
        template: template.to_string(),
        placeholder,
    };

    let begin = text
        .find(STUB_BEGIN)
        .ok_or_else(|| missing("RENDER_STUB_BEGIN"))?;
    if !text[begin..].contains(STUB_END) {
        return Err(missing("RENDER_STUB_END"));
    }
    Ok(())
}

/// Substitutes `bindings` into `text` in a single pass.
pub fn substitute(text: &str, bindings: &Bindings<'_>) -> String {
    TOKEN_RE
        .replace_all(text, |caps: &Captures<'_>| match caps.get(1) {
            Some(name) => bindings
                .value(name.as_str())
                .unwrap_or(&caps[0])
                .to_string(),
            None => bindings.stub.unwrap_or(&caps[0]).to_string(),
        })
        .into_owned()
}
