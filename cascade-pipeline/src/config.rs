//! Effective per-run configuration.

use cascade_core::{DiffMode, MapMode, RawOptions, ResolvedOptions};
use cascade_processor::{registry, BuildError, Chain, Processor};

/// Where a run's processors come from.
pub enum ProcessorSource {
    List(Vec<Box<dyn Processor>>),
    /// Called exactly once while the configuration is resolved.
    Factory(Box<dyn FnOnce() -> Vec<Box<dyn Processor>>>),
}

impl ProcessorSource {
    pub fn factory<F>(f: F) -> Self
    where
        F: FnOnce() -> Vec<Box<dyn Processor>> + 'static,
    {
        ProcessorSource::Factory(Box::new(f))
    }

    fn evaluate(self) -> Vec<Box<dyn Processor>> {
        match self {
            ProcessorSource::List(processors) => processors,
            ProcessorSource::Factory(factory) => factory(),
        }
    }
}

impl From<Vec<Box<dyn Processor>>> for ProcessorSource {
    fn from(processors: Vec<Box<dyn Processor>>) -> Self {
        ProcessorSource::List(processors)
    }
}

impl std::fmt::Debug for ProcessorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessorSource::List(processors) => f
                .debug_tuple("List")
                .field(&processors.iter().map(|p| p.name()).collect::<Vec<_>>())
                .finish(),
            ProcessorSource::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Options with every default applied and processors instantiated.
#[derive(Debug)]
pub struct ProcessingConfig {
    pub processors: Chain,
    pub map: MapMode,
    pub diff: DiffMode,
    pub write_dest: bool,
    pub fail_on_warning: bool,
    pub silent: bool,
    pub safe: bool,
}

impl ProcessingConfig {
    /// Combine resolved options with an explicit processor source. The
    /// option's own processor declarations are ignored.
    pub fn resolve(options: &ResolvedOptions, processors: ProcessorSource) -> Self {
        Self {
            processors: Chain::new(processors.evaluate()),
            map: options.map.clone(),
            diff: options.diff.clone(),
            write_dest: options.write_dest,
            fail_on_warning: options.fail_on_warning,
            silent: options.silent,
            safe: options.safe,
        }
    }

    /// Resolve task-file options, building processors from their declarations.
    pub fn from_raw(raw: &RawOptions) -> Result<Self, BuildError> {
        let options = raw.resolve();
        let processors = registry::build_all(&options.processors)?;
        Ok(Self::resolve(&options, processors.into()))
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self::resolve(&ResolvedOptions::default(), ProcessorSource::List(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use cascade_processor::builtin::Minifier;

    use super::*;

    fn raw(yaml: &str) -> RawOptions {
        serde_yaml::from_str(yaml).expect("options")
    }

    #[test]
    fn defaults() {
        let config = ProcessingConfig::default();
        assert!(config.processors.is_empty());
        assert_eq!(config.map, MapMode::Disabled);
        assert_eq!(config.diff, DiffMode::Disabled);
        assert!(config.write_dest);
        assert!(!config.fail_on_warning);
        assert!(!config.silent);
        assert!(!config.safe);
    }

    #[test]
    fn factory_is_invoked_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let config = ProcessingConfig::resolve(
            &ResolvedOptions::default(),
            ProcessorSource::factory(move || {
                counter.set(counter.get() + 1);
                vec![Box::new(Minifier) as Box<dyn Processor>]
            }),
        );
        assert_eq!(calls.get(), 1);
        assert_eq!(config.processors.names(), ["minifier"]);
    }

    #[test]
    fn processor_list_converts_into_source() {
        let processors: Vec<Box<dyn Processor>> = vec![Box::new(Minifier)];
        let source = ProcessorSource::from(processors);
        assert!(matches!(&source, ProcessorSource::List(list) if list.len() == 1));

        let config = ProcessingConfig::resolve(&ResolvedOptions::default(), source);
        assert_eq!(config.processors.names(), ["minifier"]);
    }

    #[test]
    fn from_raw_builds_declared_processors() {
        let config = ProcessingConfig::from_raw(&raw(
            "processors: [minifier, important-lint]\nwriteDest: false\n",
        ))
        .expect("config");
        assert_eq!(config.processors.names(), ["minifier", "important-lint"]);
        assert!(!config.write_dest);
    }

    #[test]
    fn from_raw_rejects_unknown_processor() {
        let err = ProcessingConfig::from_raw(&raw("processors: [nope]\n")).expect_err("unknown");
        assert!(matches!(err, BuildError::Unknown { .. }));
    }
}
