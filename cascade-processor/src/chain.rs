//! [`Chain`]: ordered processors on top of `lightningcss`.
//!
//! One [`Transform::transform`] call:
//!
//! 1. Parse the input (recovering from bad rules in safe mode).
//! 2. Run every processor in order against the parsed sheet.
//! 3. Print with the targets / minification the processors asked for,
//!    recording mappings when a map was requested.
//! 4. Serialise the map and attach it (inline or annotation).

use std::sync::{Arc, RwLock};

use lightningcss::error::{Error as CssError, ParserError};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

use crate::error::ProcessError;
use crate::excerpt::excerpt;
use crate::processor::{Context, Processor};
use crate::source_map;
use crate::transform::{ProcessingResult, Transform, TransformOptions, Warning};

/// Plugin label for problems the parser recovered from.
const PARSER_PLUGIN: &str = "parser";

/// An ordered sequence of processors.
#[derive(Default)]
pub struct Chain {
    processors: Vec<Box<dyn Processor>>,
}

impl Chain {
    pub fn new(processors: Vec<Box<dyn Processor>>) -> Self {
        Self { processors }
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("processors", &self.names())
            .finish()
    }
}

impl Transform for Chain {
    fn transform(
        &self,
        input: &str,
        options: &TransformOptions,
    ) -> Result<ProcessingResult, ProcessError> {
        let filename = options.from.to_string_lossy().into_owned();
        let recovered = Arc::new(RwLock::new(Vec::new()));
        let parser_options = ParserOptions {
            filename: filename.clone(),
            error_recovery: options.safe,
            warnings: options.safe.then(|| Arc::clone(&recovered)),
            ..ParserOptions::default()
        };

        let mut sheet = StyleSheet::parse(input, parser_options)
            .map_err(|err| syntax_error(&filename, input, &err))?;

        let mut ctx = Context::new(options.from.clone());
        for processor in &self.processors {
            tracing::debug!("running {} on {}", processor.name(), filename);
            processor.process(&mut sheet, &mut ctx)?;
        }

        let mut map = options
            .map
            .as_ref()
            .map(|request| source_map::start(&options.from, request));

        let printed = sheet
            .to_css(PrinterOptions {
                minify: ctx.minify,
                source_map: map.as_mut(),
                targets: ctx.targets,
                ..PrinterOptions::default()
            })
            .map_err(|e| ProcessError::other(format!("{filename}: {e}")))?;

        let mut warnings: Vec<Warning> = match recovered.read() {
            Ok(list) => list
                .iter()
                .map(|err| parser_warning(options, err))
                .collect(),
            Err(_) => Vec::new(),
        };
        warnings.extend(ctx.into_warnings());

        let (css, map) = match (map, &options.map) {
            (Some(map), Some(request)) => {
                let json = source_map::finish(map, &options.from, &options.to, input, request)?;
                source_map::attach(printed.code, json, &options.to, request)
            }
            _ => (printed.code, None),
        };

        Ok(ProcessingResult { css, map, warnings })
    }
}

fn syntax_error(filename: &str, input: &str, err: &CssError<ParserError<'_>>) -> ProcessError {
    let (line, column) = err
        .loc
        .as_ref()
        .map(|loc| (loc.line + 1, loc.column))
        .unwrap_or((1, 1));
    ProcessError::Syntax {
        file: filename.to_string(),
        line,
        column,
        message: err.kind.to_string(),
        excerpt: excerpt(input, line, column),
    }
}

fn parser_warning(options: &TransformOptions, err: &CssError<ParserError<'_>>) -> Warning {
    Warning {
        plugin: Some(PARSER_PLUGIN.to_string()),
        file: Some(options.from.clone()),
        line: err.loc.as_ref().map(|loc| loc.line + 1),
        column: err.loc.as_ref().map(|loc| loc.column),
        text: err.kind.to_string(),
    }
}
