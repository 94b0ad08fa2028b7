use crate::catalog::Catalog;
use crate::cli::CommandLineArgs;
use crate::models::FileFormat;
use crate::reader::{CurveReader, TraceReader};
use crate::readers;
use crate::resource_manager::ResourceManager;

use std::sync::Arc;

/// Shared application state passed to each request handler.
pub struct AppState {
    /// Command line arguments.
    pub args: CommandLineArgs,

    /// Resource manager.
    pub resource_manager: ResourceManager,

    /// LAS file catalog.
    pub las_catalog: Catalog,

    /// SEG-Y file catalog.
    pub segy_catalog: Catalog,

    /// Well-log reader, if one is available.
    pub curve_reader: Option<Arc<dyn CurveReader>>,

    /// Seismic reader, if one is available.
    pub trace_reader: Option<Arc<dyn TraceReader>>,
}

impl AppState {
    /// Create and return an [AppState] using the built-in readers.
    pub fn new(args: &CommandLineArgs) -> Self {
        Self::with_readers(args, readers::curve_reader(), readers::trace_reader())
    }

    /// Create and return an [AppState] with the given readers.
    ///
    /// # Arguments
    ///
    /// * `args`: Command line arguments
    /// * `curve_reader`: Optional well-log reader
    /// * `trace_reader`: Optional seismic reader
    pub fn with_readers(
        args: &CommandLineArgs,
        curve_reader: Option<Arc<dyn CurveReader>>,
        trace_reader: Option<Arc<dyn TraceReader>>,
    ) -> Self {
        let task_limit = args.thread_limit.or_else(|| Some(num_cpus::get()));
        Self {
            args: args.clone(),
            resource_manager: ResourceManager::new(task_limit),
            las_catalog: Catalog::new(FileFormat::Las, &args.data_dir),
            segy_catalog: Catalog::new(FileFormat::Segy, &args.data_dir),
            curve_reader,
            trace_reader,
        }
    }

    /// Catalog of a format.
    pub fn catalog(&self, format: FileFormat) -> &Catalog {
        match format {
            FileFormat::Las => &self.las_catalog,
            FileFormat::Segy => &self.segy_catalog,
        }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
