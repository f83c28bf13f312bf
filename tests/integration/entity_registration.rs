//! Registration contract of the entity construction shim, end to end with
//! the tokenizer.

use retok::mock::ScriptedUnit;
use retok::{
    CppExpression, CppType, CursorKind, CursorTokens, Entity, EntityIndex, EntityKind, Function,
    FunctionParameter, IndexError,
};
use std::rc::Rc;

#[test]
fn fresh_id_resolves_to_the_built_entity() {
    let index = EntityIndex::new();
    let param = FunctionParameter::build(
        &index,
        "c:@F@resize#I#p0".to_string(),
        "new_size",
        CppType::new("std::size_t"),
        Some(CppExpression::new("0")),
    )
    .unwrap();

    let resolved = index.lookup("c:@F@resize#I#p0").expect("registered id resolves");
    assert_eq!(resolved.kind(), EntityKind::FunctionParameter);
    assert_eq!(resolved.name(), param.name());

    // the resolved reference aliases the caller-owned entity
    let as_dyn: Rc<dyn retok::Entity> = param.clone();
    assert!(Rc::ptr_eq(&as_dyn, &resolved));
}

#[test]
fn ownership_stays_with_the_caller() {
    let index = EntityIndex::new();
    let param = FunctionParameter::build(
        &index,
        "p0".to_string(),
        "flag",
        CppType::new("bool"),
        None,
    )
    .unwrap();

    // registration did not take a strong count
    assert_eq!(Rc::strong_count(&param), 1);

    drop(param);
    assert!(index.lookup("p0").is_none());
}

#[test]
fn duplicate_registration_fails() {
    let index = EntityIndex::new();
    let _keep =
        FunctionParameter::build(&index, "same".to_string(), "a", CppType::new("int"), None)
            .unwrap();
    let err = FunctionParameter::build(&index, "same".to_string(), "b", CppType::new("int"), None)
        .unwrap_err();
    assert!(matches!(err, IndexError::DuplicateId(_)));
}

/// Full pipeline: repair a function's extent, attach the corrected token
/// sequence to the built entity, register and resolve it.
#[test]
fn function_entity_carries_repaired_tokens() {
    let source = "int answer() { return 42; }";
    let mut unit = ScriptedUnit::new(source);
    let body = source.find('{').unwrap();
    let cursor = unit.add_cursor(CursorKind::Function, 0, source.len());
    unit.add_child(&cursor, CursorKind::CompoundStmt, body, source.len());

    let tokens = CursorTokens::new(&unit, &(), &cursor);

    let index = EntityIndex::new();
    let func = Function::build(
        &index,
        "c:@F@answer".to_string(),
        "answer",
        tokens.into_tokens(),
    )
    .unwrap();

    assert_eq!(func.kind(), EntityKind::Function);
    let spellings: Vec<_> = func.tokens().iter().map(|t| t.spelling()).collect();
    assert_eq!(spellings, vec!["int", "answer", "(", ")"]);

    let resolved = index.lookup("c:@F@answer").unwrap();
    assert_eq!(resolved.name(), "answer");
}
