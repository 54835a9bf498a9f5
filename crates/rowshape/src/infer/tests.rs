use super::*;
use crate::{
    mode::HydrationMode,
    output::OutputType,
    shape::{EntityRef, FieldType, ProjectionField, ScalarType, TemplateBound},
};

// ---- fixtures ----------------------------------------------------------

const ENTITY: &str = "shop::Order";

fn entity_site() -> CallSite {
    CallSite::with_shape(ResultShape::entity(ENTITY))
}

fn projection_site() -> CallSite {
    let shape = ResultShape::projection(vec![
        ProjectionField::new("int_col", FieldType::new(ScalarType::Int)),
        ProjectionField::new("string_null_col", FieldType::nullable(ScalarType::Text)),
    ])
    .expect("distinct fields should construct");

    CallSite::with_shape(shape)
}

fn single_column_site() -> CallSite {
    let shape = ResultShape::projection(vec![ProjectionField::new(
        "int_col",
        FieldType::new(ScalarType::Int),
    )])
    .expect("single field should construct");

    CallSite::with_shape(shape)
}

fn entity_out() -> OutputType {
    OutputType::Entity(EntityRef::new(ENTITY))
}

fn narrowed(result: InferenceResult) -> OutputType {
    match result {
        InferenceResult::Narrowed(ty) => ty,
        InferenceResult::Defer => panic!("expected narrowed result"),
    }
}

// ---- implicit defaults -------------------------------------------------

#[test]
fn results_defaults_to_object_hydration() {
    assert_eq!(
        narrowed(infer(QueryOp::Results, &entity_site())),
        OutputType::list(entity_out())
    );
}

#[test]
fn iterate_defaults_to_object_hydration() {
    assert_eq!(
        narrowed(infer(QueryOp::Iterate, &entity_site())),
        OutputType::sequence(entity_out())
    );
}

#[test]
fn inherited_defaults_stay_opaque() {
    // These fall back to a runtime property of the query value.
    assert_eq!(
        narrowed(infer(QueryOp::Execute, &entity_site())),
        OutputType::list(OutputType::Unknown)
    );
    assert_eq!(
        narrowed(infer(QueryOp::SingleResult, &entity_site())),
        OutputType::Unknown
    );
    assert_eq!(
        narrowed(infer(QueryOp::SingleOrNull, &entity_site())),
        OutputType::Unknown
    );
}

// ---- explicit mode arguments -------------------------------------------

#[test]
fn results_reads_mode_argument_at_position_zero() {
    let site = CallSite::with_mode_argument(
        ResultShape::entity(ENTITY),
        ModeArgument::Constant(HydrationMode::Array),
    );

    assert_eq!(
        narrowed(infer(QueryOp::Results, &site)),
        OutputType::list(OutputType::Unknown)
    );
}

#[test]
fn execute_reads_mode_argument_at_position_one() {
    // Position 0 is the parameters argument; its value is irrelevant here.
    let site = CallSite::with_shape(ResultShape::entity(ENTITY))
        .argument(Some(ModeArgument::Dynamic))
        .argument(Some(ModeArgument::Constant(HydrationMode::Object)));

    assert_eq!(
        narrowed(infer(QueryOp::Execute, &site)),
        OutputType::list(entity_out())
    );
}

#[test]
fn dynamic_mode_argument_degrades_to_opaque() {
    let site =
        CallSite::with_mode_argument(ResultShape::entity(ENTITY), ModeArgument::Dynamic);

    assert_eq!(
        narrowed(infer(QueryOp::Results, &site)),
        OutputType::list(OutputType::Unknown)
    );
}

// ---- convenience operations --------------------------------------------

#[test]
fn record_results_follow_the_array_row() {
    assert_eq!(
        narrowed(infer(QueryOp::RecordResults, &entity_site())),
        OutputType::list(OutputType::Unknown)
    );

    let InferenceResult::Narrowed(OutputType::List(element)) =
        infer(QueryOp::RecordResults, &projection_site())
    else {
        panic!("expected narrowed list");
    };
    assert!(matches!(*element, OutputType::Record(_)));
}

#[test]
fn scalar_results_flatten_entities_to_untyped_rows() {
    assert_eq!(
        narrowed(infer(QueryOp::ScalarResults, &entity_site())),
        OutputType::list(OutputType::AnyRecord)
    );
}

#[test]
fn single_scalar_narrows_one_column_queries() {
    assert_eq!(
        narrowed(infer(QueryOp::SingleScalar, &single_column_site())),
        OutputType::Scalar(FieldType::new(ScalarType::Int))
    );
    assert_eq!(
        narrowed(infer(QueryOp::SingleScalar, &projection_site())),
        OutputType::Unknown
    );
}

#[test]
fn column_results_narrow_one_column_queries() {
    assert_eq!(
        narrowed(infer(QueryOp::ColumnResults, &single_column_site())),
        OutputType::list(OutputType::Scalar(FieldType::new(ScalarType::Int)))
    );
}

// ---- deferral ----------------------------------------------------------

#[test]
fn missing_shape_defers() {
    let site = CallSite::default();

    for op in QueryOp::ALL {
        assert!(infer(op, &site).is_defer(), "{op}");
    }
}

#[test]
fn may_be_void_template_defers_through_the_engine() {
    let site = CallSite::with_shape(ResultShape::template("T", TemplateBound::MaybeVoid));

    for op in QueryOp::ALL {
        assert!(infer(op, &site).is_defer(), "{op}");
    }
}

#[test]
fn non_void_template_narrows_single_or_null() {
    let site = CallSite::with_shape(ResultShape::template("T", TemplateBound::NonVoid));

    let result = infer(QueryOp::SingleOrNull, &site);
    let InferenceResult::Narrowed(OutputType::Nullable(element)) = result else {
        panic!("expected narrowed nullable result");
    };
    assert!(matches!(*element, OutputType::Template(_)));
}

// ---- named lookup ------------------------------------------------------

#[test]
fn named_inference_uses_the_table() {
    let table = OperationTable::builtin();

    assert_eq!(
        infer_named(&table, "results", &entity_site()),
        infer(QueryOp::Results, &entity_site())
    );
}

#[test]
fn unknown_operation_name_defers() {
    let table = OperationTable::builtin();

    assert!(infer_named(&table, "load_everything", &entity_site()).is_defer());
}

#[test]
fn registered_custom_operation_is_inferred() {
    use crate::op::OperationSpec;

    let table = OperationTable::builtin().with_operation(
        "first_record",
        OperationSpec {
            wrapper: CardinalityWrapper::OneOrNull,
            mode: ModeSelector::Implicit(HydrationMode::Array),
        },
    );

    let result = infer_named(&table, "first_record", &projection_site());
    let InferenceResult::Narrowed(OutputType::Nullable(element)) = result else {
        panic!("expected narrowed nullable result");
    };
    assert!(matches!(*element, OutputType::Record(_)));
}

// ---- telemetry ---------------------------------------------------------

#[test]
fn inference_outcomes_are_counted() {
    obs::reset();

    let _ = infer(QueryOp::Results, &entity_site());
    let _ = infer(QueryOp::Execute, &entity_site());
    let _ = infer(QueryOp::Results, &CallSite::default());

    let report = obs::report();
    assert_eq!(report.totals.narrowed, 1);
    assert_eq!(report.totals.opaque, 1);
    assert_eq!(report.totals.deferred, 1);

    let results = report
        .ops
        .get("results")
        .expect("results row should be present");
    assert_eq!(results.narrowed, 1);
    assert_eq!(results.deferred, 1);
}
