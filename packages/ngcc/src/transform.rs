//! Per-file pipeline
//!
//! parse -> reflect -> analyze -> render, for one module. Everything borrows
//! from an allocator owned by this call, so files never share state and can be
//! transformed in parallel.

use oxc_allocator::Allocator;

use crate::analysis::Analyzer;
use crate::config::NgccConfig;
use crate::definitions::CoreDefinitionCompiler;
use crate::error::NgccError;
use crate::host::{
    detect_format, Esm2015ReflectionHost, Esm5ReflectionHost, ModuleFormat, NgccReflectionHost,
};
use crate::logging::Logger;
use crate::parsing::{Esm2015FileParser, Esm5FileParser, FileParser};
use crate::rendering::{Esm2015Renderer, Esm5Renderer, RenderResult, RenderStrategy, Renderer};
use crate::source_file::SourceFile;

/// Transform the module `file_name` with text `contents`, rendering it as if
/// it were written to `target_path`.
pub fn transform_file(
    file_name: &str,
    contents: &str,
    target_path: &str,
    config: &NgccConfig,
    logger: &dyn Logger,
) -> Result<RenderResult, NgccError> {
    let allocator = Allocator::default();
    let source_file = SourceFile::parse(&allocator, file_name, contents)?;

    // A module with neither shape holds no classes; it is passed through.
    let format = config
        .format
        .fixed()
        .or_else(|| detect_format(&source_file))
        .unwrap_or(ModuleFormat::Esm2015);
    logger.debug(&format!("{}: reading as {}", file_name, format));

    let compiler = CoreDefinitionCompiler::from_config(config);
    let analyzer = Analyzer::new(&compiler, logger, config.import_prefix.clone());

    match format {
        ModuleFormat::Esm2015 => {
            let host = Esm2015ReflectionHost::new(source_file);
            let parser = Esm2015FileParser::new(&host);
            render(&host, &parser, &analyzer, Esm2015Renderer::new(&host), target_path)
        }
        ModuleFormat::Esm5 => {
            let host = Esm5ReflectionHost::new(source_file);
            let parser = Esm5FileParser::new(&host);
            render(&host, &parser, &analyzer, Esm5Renderer::new(&host), target_path)
        }
    }
}

fn render<'a, H, P, S>(
    host: &H,
    parser: &P,
    analyzer: &Analyzer<'_>,
    strategy: S,
    target_path: &str,
) -> Result<RenderResult, NgccError>
where
    H: NgccReflectionHost<'a>,
    P: FileParser<'a>,
    S: RenderStrategy<'a>,
{
    let parsed = parser.parse_file();
    let analyzed = analyzer.analyze_file(&parsed, host.source_file().declared_names());
    Ok(Renderer::new(strategy).render_file(&analyzed, target_path)?)
}
