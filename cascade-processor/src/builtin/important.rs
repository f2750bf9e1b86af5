use lightningcss::rules::CssRule;
use lightningcss::stylesheet::StyleSheet;

use crate::error::ProcessError;
use crate::processor::{Context, Processor};

/// Reports every `!important` declaration, including those in nested,
/// `@media` and `@supports` rules. The stylesheet is left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportantLint;

struct Finding {
    line: u32,
    column: u32,
    property: String,
}

impl Processor for ImportantLint {
    fn name(&self) -> &str {
        "important-lint"
    }

    fn process(&self, sheet: &mut StyleSheet<'_, '_>, ctx: &mut Context) -> Result<(), ProcessError> {
        let mut findings = Vec::new();
        collect(&sheet.rules.0, &mut findings);
        for finding in findings {
            ctx.warn(
                self.name(),
                format!("{} is declared !important", finding.property),
                finding.line,
                finding.column,
            );
        }
        Ok(())
    }
}

fn collect(rules: &[CssRule<'_>], out: &mut Vec<Finding>) {
    for rule in rules {
        match rule {
            CssRule::Style(style) => {
                for property in &style.declarations.important_declarations {
                    out.push(Finding {
                        line: style.loc.line + 1,
                        column: style.loc.column,
                        property: property.property_id().name().to_string(),
                    });
                }
                collect(&style.rules.0, out);
            }
            CssRule::Media(media) => collect(&media.rules.0, out),
            CssRule::Supports(supports) => collect(&supports.rules.0, out),
            _ => {}
        }
    }
}
