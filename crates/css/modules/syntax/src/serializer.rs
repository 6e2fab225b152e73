//! Text output for a [`Stylesheet`].

use crate::model::{Declaration, NestedRule, OpaqueRule, StyleRule, Stylesheet, TopLevelRule};

/// Output formatting switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit without optional whitespace and without the last `;` of a block.
    pub minify: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { minify: true }
    }
}

impl SerializeOptions {
    pub const MINIFIED: Self = Self { minify: true };
    pub const PRETTY: Self = Self { minify: false };
}

const INDENT: &str = "  ";

struct Writer {
    out: String,
    minify: bool,
}

impl Writer {
    fn indent(&mut self, depth: usize) {
        if !self.minify {
            for _ in 0..depth {
                self.out.push_str(INDENT);
            }
        }
    }

    fn open_block(&mut self) {
        self.out.push_str(if self.minify { "{" } else { " {\n" });
    }

    fn close_block(&mut self, depth: usize) {
        self.indent(depth);
        self.out.push('}');
        if !self.minify {
            self.out.push('\n');
        }
    }

    fn rule_separator(&mut self, index: usize) {
        if index > 0 && !self.minify {
            self.out.push('\n');
        }
    }

    fn declarations(&mut self, declarations: &[Declaration], depth: usize) {
        let last = declarations.len().saturating_sub(1);
        for (index, declaration) in declarations.iter().enumerate() {
            if self.minify {
                self.out.push_str(&declaration.property);
                self.out.push(':');
                self.out.push_str(&declaration.value);
                if index != last {
                    self.out.push(';');
                }
            } else {
                self.indent(depth);
                self.out.push_str(&declaration.property);
                self.out.push_str(": ");
                self.out.push_str(&declaration.value);
                self.out.push_str(";\n");
            }
        }
    }

    fn style_rule(&mut self, rule: &StyleRule, depth: usize) {
        self.indent(depth);
        let separator = if self.minify { "," } else { ", " };
        self.out.push_str(&rule.selectors.join(separator));
        self.open_block();
        self.declarations(&rule.declarations, depth + 1);
        self.close_block(depth);
    }

    fn conditional(&mut self, keyword: &str, condition: &str, rules: &[NestedRule]) {
        self.out.push('@');
        self.out.push_str(keyword);
        if !condition.is_empty() {
            self.out.push(' ');
            self.out.push_str(condition);
        }
        self.open_block();
        for (index, rule) in rules.iter().enumerate() {
            self.rule_separator(index);
            match rule {
                NestedRule::Style(style) => self.style_rule(style, 1),
                NestedRule::Opaque(opaque) => self.opaque(opaque, 1),
            }
        }
        self.close_block(0);
    }

    fn opaque(&mut self, rule: &OpaqueRule, depth: usize) {
        self.indent(depth);
        self.out.push('@');
        self.out.push_str(&rule.name);
        if !rule.prelude.is_empty() {
            self.out.push(' ');
            self.out.push_str(&rule.prelude);
        }
        match &rule.body {
            Some(body) => {
                self.out.push_str(if self.minify { "{" } else { " {\n" });
                if !body.is_empty() {
                    self.indent(depth + 1);
                    self.out.push_str(body);
                    if !self.minify {
                        self.out.push('\n');
                    }
                }
                self.close_block(depth);
            }
            None => {
                self.out.push(';');
                if !self.minify {
                    self.out.push('\n');
                }
            }
        }
    }

    fn rule(&mut self, rule: &TopLevelRule) {
        match rule {
            TopLevelRule::Style(style) => self.style_rule(style, 0),
            TopLevelRule::Media(media) => self.conditional("media", &media.query, &media.rules),
            TopLevelRule::Supports(supports) => {
                self.conditional("supports", &supports.condition, &supports.rules);
            }
            TopLevelRule::Import(import) => {
                self.out.push_str("@import ");
                self.out.push_str(&import.prelude);
                self.out.push(';');
                if !self.minify {
                    self.out.push('\n');
                }
            }
            TopLevelRule::Opaque(opaque) => self.opaque(opaque, 0),
        }
    }
}

/// Write the stylesheet back out as CSS text.
#[must_use]
pub fn serialize(sheet: &Stylesheet, options: SerializeOptions) -> String {
    let mut writer = Writer {
        out: String::new(),
        minify: options.minify,
    };
    for (index, rule) in sheet.rules.iter().enumerate() {
        writer.rule_separator(index);
        writer.rule(rule);
    }
    writer.out
}
