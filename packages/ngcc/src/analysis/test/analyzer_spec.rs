use crate::analysis::Analyzer;
use crate::definitions::{CompiledDefinition, CoreDefinitionCompiler, DefinitionCompiler};
use crate::host::Esm2015ReflectionHost;
use crate::import_manager::ImportManager;
use crate::logging::{LogLevel, NullLogger};
use crate::parsing::{Esm2015FileParser, FileParser, ParsedClass};
use crate::testing::{parse, MockLogger, TestFile};
use oxc_allocator::Allocator;
use std::collections::HashSet;

const TEST_PROGRAM: TestFile = TestFile {
    name: "/test.js",
    contents: r#"
    import { Component, Directive, Injectable } from '@angular/core';

    export class MyComponent {}
    MyComponent.decorators = [{ type: Component, args: [{ selector: 'my-cmp' }] }];

    export class MyDirective {}
    MyDirective.decorators = [{ type: Directive, args: [{ selector: '[my-dir]' }] }];

    export class Plain {}

    export class Empty {}
    Empty.decorators = [];

    export class Twice {}
    Twice.decorators = [
      { type: Injectable },
      { type: Directive, args: [{ selector: '[twice]' }] }
    ];
  "#,
};

const NO_CLASSES: TestFile = TestFile {
    name: "/none.js",
    contents: "export const x = 1;",
};

/// Compiles every class into a fixed marker, recording what it was given.
struct FakeCompiler;

impl DefinitionCompiler for FakeCompiler {
    fn compile<'a>(
        &self,
        class: &ParsedClass<'a>,
        _source_text: &'a str,
        imports: &mut ImportManager,
    ) -> Option<CompiledDefinition<'a>> {
        if class.name == "MyDirective" {
            return None;
        }
        let alias = imports.generate_namespace_import("@angular/core");
        Some(CompiledDefinition {
            text: format!("// {} via {}", class.name, alias),
            decorators: class.decorators.clone().unwrap_or_default(),
            ignored: Vec::new(),
        })
    }
}

mod analyze_file {
    use super::*;

    #[test]
    fn should_only_analyze_classes_with_decorators() {
        let allocator = Allocator::default();
        let host = Esm2015ReflectionHost::new(parse(&allocator, TEST_PROGRAM));
        let parsed = Esm2015FileParser::new(&host).parse_file();
        let logger = NullLogger;
        let analyzer = Analyzer::new(&FakeCompiler, &logger, "ɵ");

        let analyzed = analyzer.analyze_file(&parsed, HashSet::new());

        assert_eq!(analyzed.file_name, "/test.js");
        assert_eq!(
            analyzed
                .analyzed_classes
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>(),
            vec!["MyComponent", "Twice"]
        );
        assert_eq!(analyzed.analyzed_classes[0].definition, "// MyComponent via ɵ0");
        assert_eq!(analyzed.analyzed_classes[0].decorators.len(), 1);
    }

    #[test]
    fn should_share_one_import_manager_per_file() {
        let allocator = Allocator::default();
        let host = Esm2015ReflectionHost::new(parse(&allocator, TEST_PROGRAM));
        let parsed = Esm2015FileParser::new(&host).parse_file();
        let logger = NullLogger;
        let analyzer = Analyzer::new(&FakeCompiler, &logger, "ɵ");

        let used_names: HashSet<String> = ["ɵ0".to_string()].into_iter().collect();
        let analyzed = analyzer.analyze_file(&parsed, used_names);

        let imports = analyzed.imports.get_all_imports();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].alias, "ɵ1");
        assert_eq!(analyzed.analyzed_classes[1].definition, "// Twice via ɵ1");
    }

    #[test]
    fn should_return_an_empty_result_when_nothing_is_decorated() {
        let allocator = Allocator::default();
        let host = Esm2015ReflectionHost::new(parse(&allocator, NO_CLASSES));
        let parsed = Esm2015FileParser::new(&host).parse_file();
        let logger = NullLogger;
        let analyzer = Analyzer::new(&FakeCompiler, &logger, "ɵ");

        let analyzed = analyzer.analyze_file(&parsed, HashSet::new());

        assert!(analyzed.is_empty());
        assert!(analyzed.imports.is_empty());
    }

    #[test]
    fn should_log_skipped_classes() {
        let allocator = Allocator::default();
        let host = Esm2015ReflectionHost::new(parse(&allocator, TEST_PROGRAM));
        let parsed = Esm2015FileParser::new(&host).parse_file();
        let logger = MockLogger::default();
        let analyzer = Analyzer::new(&FakeCompiler, &logger, "ɵ");

        analyzer.analyze_file(&parsed, HashSet::new());

        assert!(logger
            .messages(LogLevel::Debug)
            .contains(&"/test.js: skipping class MyDirective, no definition to generate".to_string()));
        assert!(logger.messages(LogLevel::Warn).is_empty());
    }

    #[test]
    fn should_warn_about_extra_recognized_decorators() {
        let allocator = Allocator::default();
        let host = Esm2015ReflectionHost::new(parse(&allocator, TEST_PROGRAM));
        let parsed = Esm2015FileParser::new(&host).parse_file();
        let logger = MockLogger::default();
        let compiler = CoreDefinitionCompiler::new("@angular/core", false);
        let analyzer = Analyzer::new(&compiler, &logger, "ɵ");

        let analyzed = analyzer.analyze_file(&parsed, HashSet::new());

        assert_eq!(analyzed.analyzed_classes.len(), 3);
        let twice = &analyzed.analyzed_classes[2];
        assert_eq!(twice.decorators.len(), 1);
        assert_eq!(twice.decorators[0].name, "Injectable");
        assert_eq!(
            logger.messages(LogLevel::Warn),
            vec![
                "/test.js: class Twice has several Angular decorators, only @Injectable is compiled (ignored: @Directive)"
                    .to_string()
            ]
        );
    }
}
