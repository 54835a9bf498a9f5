use super::*;

#[test]
fn method_names_round_trip() {
    for op in QueryOp::ALL {
        let parsed: QueryOp = op
            .method_name()
            .parse()
            .expect("method name should parse back");
        assert_eq!(parsed, op);
    }
}

#[test]
fn unknown_operation_name_fails_to_parse() {
    let err = "get_all_the_things"
        .parse::<QueryOp>()
        .expect_err("unknown name must not parse");

    assert_eq!(
        err,
        ParseOpError::UnknownOperation {
            name: "get_all_the_things".to_string()
        }
    );
}

#[test]
fn materializing_operations_use_many_wrapper() {
    for op in [
        QueryOp::Results,
        QueryOp::Execute,
        QueryOp::ExecuteCached,
        QueryOp::ExecuteUncached,
        QueryOp::RecordResults,
        QueryOp::ScalarResults,
        QueryOp::ColumnResults,
    ] {
        assert_eq!(op.spec().wrapper, CardinalityWrapper::Many, "{op}");
    }

    assert_eq!(QueryOp::Iterate.spec().wrapper, CardinalityWrapper::LazySequence);
    assert_eq!(QueryOp::SingleResult.spec().wrapper, CardinalityWrapper::One);
    assert_eq!(QueryOp::SingleScalar.spec().wrapper, CardinalityWrapper::One);
    assert_eq!(QueryOp::SingleOrNull.spec().wrapper, CardinalityWrapper::OneOrNull);
}

#[test]
fn convenience_operations_pin_their_mode() {
    let implicit = [
        (QueryOp::RecordResults, HydrationMode::Array),
        (QueryOp::ScalarResults, HydrationMode::Scalar),
        (QueryOp::SingleScalar, HydrationMode::SingleScalar),
        (QueryOp::ColumnResults, HydrationMode::ScalarColumn),
    ];

    for (op, mode) in implicit {
        assert_eq!(op.spec().mode, ModeSelector::Implicit(mode), "{op}");
    }
}

#[test]
fn mode_argument_positions_match_signatures() {
    // The materializing/streaming operations take a leading parameters
    // argument; the single-row reads take the mode first.
    for op in [QueryOp::Execute, QueryOp::ExecuteCached, QueryOp::ExecuteUncached, QueryOp::Iterate]
    {
        let ModeSelector::Argument { position, .. } = op.spec().mode else {
            panic!("{op} should take a mode argument");
        };
        assert_eq!(position, 1, "{op}");
    }

    for op in [QueryOp::Results, QueryOp::SingleResult, QueryOp::SingleOrNull] {
        let ModeSelector::Argument { position, .. } = op.spec().mode else {
            panic!("{op} should take a mode argument");
        };
        assert_eq!(position, 0, "{op}");
    }
}

#[test]
fn builtin_table_contains_every_operation() {
    let table = OperationTable::builtin();
    assert_eq!(table.len(), QueryOp::ALL.len());

    for op in QueryOp::ALL {
        let spec = table
            .get(op.method_name())
            .expect("builtin operation should be registered");
        assert_eq!(*spec, op.spec());
    }
}

#[test]
fn custom_operations_can_be_registered_and_replaced() {
    let custom = OperationSpec {
        wrapper: CardinalityWrapper::Many,
        mode: ModeSelector::Implicit(HydrationMode::Array),
    };

    let table = OperationTable::builtin().with_operation("rows_as_records", custom);
    assert_eq!(table.get("rows_as_records"), Some(&custom));
    assert!(table.get("nonexistent").is_none());

    // Replacement under the same name wins.
    let replacement = OperationSpec {
        wrapper: CardinalityWrapper::One,
        mode: ModeSelector::Implicit(HydrationMode::SingleScalar),
    };
    let table = table.with_operation("rows_as_records", replacement);
    assert_eq!(table.get("rows_as_records"), Some(&replacement));
}
