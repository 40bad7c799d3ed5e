use indoc::indoc;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use symscan_preprocessor::preprocess;
use symscan_symbols::{
    CollectStats, CollectorOptions, MapConfig, MapError, Symbol, SymbolTable,
    collect_declarations,
};

const PROGRAM: &str = indoc! {r#"
    #include <stdio.h>

    int counter = 0;

    int add(int a, int b) {
        return a + b;
    }

    int main(void) {
        double ratio = 1.5;
        char *name = "x";
        counter = add(counter, 2);
        printf("%d\n", counter);
        free(name);
        return 0;
    }
"#};

fn scan(options: CollectorOptions) -> (SymbolTable, CollectStats) {
    let mut table = SymbolTable::new(3).unwrap();
    let stats = collect_declarations(&preprocess(PROGRAM), options, &mut table).unwrap();
    (table, stats)
}

#[test]
fn test_dump_lists_buckets_in_directory_order() {
    let (table, _) = scan(CollectorOptions::default());

    assert_snapshot!(table.to_string(), @r###"
    === Symbol Table ===

    hash: 0    | lexeme: printf          | size: -1   | type: function     | scope: global
    hash: 0    | lexeme: ratio           | size: 8    | type: double       | scope: global
    hash: 1    | lexeme: free            | size: -1   | type: function     | scope: global
    hash: 1    | lexeme: b               | size: 4    | type: int          | scope: global
    hash: 1    | lexeme: counter         | size: 4    | type: int          | scope: global
    hash: 2    | lexeme: main            | size: 4    | type: function     | scope: global
    hash: 6    | lexeme: name            | size: 1    | type: char         | scope: global
    hash: 6    | lexeme: a               | size: 4    | type: int          | scope: global
    hash: 6    | lexeme: add             | size: 4    | type: function     | scope: global

    ====================
    "###);
    assert_eq!(table.map().global_depth(), 3);
    assert_eq!(table.map().check_invariants(), Ok(()));
}

#[test]
fn test_collect_stats() {
    let (table, stats) = scan(CollectorOptions::default());

    assert_eq!(
        stats,
        CollectStats {
            tokens: 63,
            identifiers: 16,
            recorded: 9,
            duplicates: 1,
        }
    );
    assert_eq!(table.len(), 9);
}

#[test]
fn test_undeclared_uses_are_duplicates_of_their_declarations() {
    let (table, stats) = scan(CollectorOptions {
        record_undeclared: true,
    });

    assert_eq!(stats.recorded, 9);
    assert_eq!(stats.duplicates, 7);
    assert_eq!(table.get("counter"), Some(&Symbol::global("counter", 4, "int")));
}

#[test]
fn test_directive_contents_are_not_scanned() {
    let (table, _) = scan(CollectorOptions {
        record_undeclared: true,
    });

    assert!(!table.contains("include"));
    assert!(!table.contains("stdio"));
}

#[test]
fn test_empty_table_dump() {
    let table = SymbolTable::default();

    assert_snapshot!(table.to_string(), @r###"
    === Symbol Table ===


    ====================
    "###);
}

#[test]
fn test_degenerate_table_reports_collect_error() {
    let config = MapConfig {
        bucket_limit: 1,
        max_global_depth: 1,
    };
    let mut table = SymbolTable::with_config(config).unwrap();

    // "a" and "c" share slot 0 and the table may not grow past depth 1.
    let error = collect_declarations("int a;\nint c;", CollectorOptions::default(), &mut table)
        .unwrap_err();

    assert_eq!(&*error.lexeme, "c");
    assert_eq!(error.span.start.line, 2);
    assert_eq!(
        error.kind,
        MapError::DegenerateSplit {
            rounds: 0,
            local_depth: 1
        }
    );
    assert!(table.contains("a"));
}

#[test]
fn test_destroy_counts_distinct_buckets() {
    let (table, _) = scan(CollectorOptions::default());
    let distinct = table.map().buckets().count();

    assert_eq!(distinct, 4);
    assert_eq!(table.destroy(), 4);
}
