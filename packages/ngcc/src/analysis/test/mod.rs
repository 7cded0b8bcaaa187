mod analyzer_spec;
