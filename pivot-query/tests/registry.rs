//! Registry-driven invocation as a dispatch framework would use it

use pivot_core::{Kind, ScalarValue};
use pivot_query::{EvalOptions, Operator, OperatorRegistry, OperatorSpec, QueryError};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn registry_types_are_shareable() {
    assert_send_sync::<ScalarValue>();
    assert_send_sync::<Operator>();
    assert_send_sync::<OperatorSpec>();
    assert_send_sync::<OperatorRegistry>();
}

#[test]
fn global_registry_is_built_once() {
    let a = OperatorRegistry::global() as *const OperatorRegistry;
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| OperatorRegistry::global() as *const OperatorRegistry as usize))
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), a as usize);
    }
}

#[test]
fn concurrent_invocations_agree() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let registry = OperatorRegistry::global();
                let args = [ScalarValue::Int64(i), ScalarValue::from("abc")];
                registry.invoke(">", &args)
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        // zero test against a non-numeric string
        let expected = ScalarValue::Bool(i > 0);
        assert_eq!(h.join().unwrap(), Ok(expected));
    }
}

#[test]
fn every_name_and_symbol_resolves() {
    let registry = OperatorRegistry::global();
    for op in Operator::ALL {
        for name in [op.name(), op.symbol()] {
            let spec = registry.get(name).unwrap();
            assert_eq!(spec.operator, op);
            assert_eq!(registry.spec(op).name, spec.name);
        }
    }
}

#[test]
fn acceptance_follows_operator_family() {
    let registry = OperatorRegistry::global();
    let dt = ScalarValue::datetime("2024-01-15").unwrap();
    let text = ScalarValue::from("2024-01-15");

    for spec in registry.iter() {
        let kinds = [dt.kind(), ScalarValue::Int64(1).kind()];
        let accepted = spec.accepts.check(&kinds).is_ok();
        // datetimes compare with numbers but have no truth reading
        assert_eq!(accepted, spec.operator.is_comparison(), "{}", spec.name);

        let err = registry
            .invoke(spec.name, &[dt.clone(), text.clone()])
            .unwrap_err();
        assert!(
            matches!(err, QueryError::KindNotAccepted { .. }),
            "{}: {err}",
            spec.name
        );
    }
}

#[test]
fn skipping_kind_check_evaluates_rejected_pairs() {
    let registry = OperatorRegistry::global();
    let opts = EvalOptions::new().without_kind_check();
    let dt = ScalarValue::datetime("2024-01-15").unwrap();

    // rejected by acceptance, but well defined for the comparator
    let args = [dt.clone(), ScalarValue::from("2024-01-15 00:00:00")];
    assert_eq!(
        registry.invoke_with("EQ", &args, &opts),
        Ok(ScalarValue::Bool(true))
    );

    // rejected by acceptance and fatal in evaluation
    let args = [dt, ScalarValue::from("tomorrow")];
    assert!(registry.invoke_with("EQ", &args, &opts).unwrap_err().is_fatal());
}

#[test]
fn options_from_host_config() {
    let opts: EvalOptions = serde_json::from_str(r#"{"check_arity": false}"#).unwrap();
    let registry = OperatorRegistry::global();
    let args = [
        ScalarValue::Int64(1),
        ScalarValue::Int64(2),
        ScalarValue::Bytes(vec![]),
    ];
    // the surplus third operand is neither counted nor kind-checked
    assert_eq!(
        registry.invoke_with("ne", &args, &opts),
        Ok(ScalarValue::Bool(true))
    );
    assert!(matches!(
        registry.invoke("ne", &args),
        Err(QueryError::ArityMismatch { found: 3, .. })
    ));
}

#[test]
fn rejection_reports_position_and_partner() {
    let registry = OperatorRegistry::global();
    let err = registry
        .invoke("OR", &[ScalarValue::Int64(1), ScalarValue::Bytes(vec![1])])
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::KindNotAccepted {
            operator: "OR",
            position: 0,
            kind: Kind::Int64,
            other: Kind::Bytes,
        }
    );
}
