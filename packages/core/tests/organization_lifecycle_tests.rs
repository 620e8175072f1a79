//! Organization lifecycle tests
//!
//! State changes run against the in-memory backend, which writes one audit
//! record per successful change like the real one does.

mod common;

use crate::common::TestHarness;
use alma_core::common::auth::AuthError;
use alma_core::common::OrganizationId;
use alma_core::domains::organization::actions::{
    get_organization, list_organizations_by_state, organization_audit_history,
    recent_audit_records, request_state_change, request_state_change_by_id,
    DEFAULT_AUDIT_LIMIT,
};
use alma_core::domains::organization::{AuditAction, LifecycleError, OrganizationStatus};
use alma_core::kernel::ApiError;

// ============================================================================
// Preconditions
// ============================================================================

#[tokio::test]
async fn blank_reason_makes_no_backend_call() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();
    let org = harness.api().organization(1).unwrap();

    for reason in ["", "   ", "\t\n"] {
        let result =
            request_state_change(&org, OrganizationStatus::Suspended, reason, None, &deps).await;
        assert!(matches!(result, Err(LifecycleError::MissingReason)));
    }

    let result =
        request_state_change_by_id(OrganizationId::from_raw(1), OrganizationStatus::Suspended, " ", None, &deps)
            .await;
    assert!(matches!(result, Err(LifecycleError::MissingReason)));

    assert_eq!(harness.api().call_count(), 0);
    assert!(harness.api().audit_records().is_empty());
}

#[tokio::test]
async fn transition_outside_table_makes_no_backend_call() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();
    let active = harness.api().organization(1).unwrap();
    let deregistered = harness.api().organization(3).unwrap();

    let result = request_state_change(
        &active,
        OrganizationStatus::Deregistered,
        "Cierre definitivo",
        None,
        &deps,
    )
    .await;
    assert!(matches!(
        result,
        Err(LifecycleError::InvalidTransition {
            from: OrganizationStatus::Active,
            to: OrganizationStatus::Deregistered,
        })
    ));

    let result = request_state_change(
        &deregistered,
        OrganizationStatus::Active,
        "Reapertura",
        None,
        &deps,
    )
    .await;
    assert!(matches!(result, Err(LifecycleError::InvalidTransition { .. })));

    assert_eq!(harness.api().call_count(), 0);
}

#[tokio::test]
async fn org_admin_cannot_change_state() {
    let harness = TestHarness::as_org_admin();
    let deps = harness.client_deps();
    let org = harness.api().organization(1).unwrap();

    let result =
        request_state_change(&org, OrganizationStatus::Suspended, "Impago", None, &deps).await;

    assert!(matches!(
        result,
        Err(LifecycleError::Unauthorized(AuthError::PermissionDenied { .. }))
    ));
    assert_eq!(harness.api().call_count(), 0);
}

#[tokio::test]
async fn no_session_requires_authentication() {
    let harness = TestHarness::anonymous();
    let deps = harness.client_deps();
    let org = harness.api().organization(1).unwrap();

    let result =
        request_state_change(&org, OrganizationStatus::Suspended, "Impago", None, &deps).await;

    assert!(matches!(
        result,
        Err(LifecycleError::Unauthorized(AuthError::AuthenticationRequired))
    ));
    assert_eq!(harness.api().call_count(), 0);
}

// ============================================================================
// Successful transitions
// ============================================================================

#[tokio::test]
async fn suspend_produces_exactly_one_audit_record() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();
    let org = harness.api().organization(1).unwrap();

    let before = organization_audit_history(org.id, &deps).await.unwrap();
    assert!(before.is_empty());

    let updated = request_state_change(
        &org,
        OrganizationStatus::Suspended,
        "  Documentación caducada  ",
        None,
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(updated.estado, OrganizationStatus::Suspended);

    let after = organization_audit_history(org.id, &deps).await.unwrap();
    assert_eq!(after.len(), 1);

    let record = &after[0];
    assert_eq!(record.motivo, "Documentación caducada");
    assert_eq!(record.tipo_accion, AuditAction::SuspendOrganization);
    assert_eq!(record.id_registro_afectado, org.id.raw());
    assert_eq!(record.previous_status(), Some(OrganizationStatus::Active));
    assert_eq!(record.new_status(), Some(OrganizationStatus::Suspended));
    assert_eq!(harness.api().calls_to("change_organization_state"), 1);
}

#[tokio::test]
async fn suspend_then_reactivate_then_deregister() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();
    let id = OrganizationId::from_raw(1);

    let org = request_state_change_by_id(id, OrganizationStatus::Suspended, "Impago", None, &deps)
        .await
        .unwrap();
    let org = request_state_change(&org, OrganizationStatus::Active, "Regularizado", None, &deps)
        .await
        .unwrap();
    let org = request_state_change(&org, OrganizationStatus::Suspended, "Impago", None, &deps)
        .await
        .unwrap();
    let org = request_state_change(
        &org,
        OrganizationStatus::Deregistered,
        "Cierre",
        Some("Solicitado por la entidad"),
        &deps,
    )
    .await
    .unwrap();
    assert!(org.estado.is_terminal());

    let history = organization_audit_history(id, &deps).await.unwrap();
    let actions: Vec<AuditAction> = history.iter().map(|r| r.tipo_accion).collect();
    // newest first
    assert_eq!(
        actions,
        vec![
            AuditAction::DeregisterOrganization,
            AuditAction::SuspendOrganization,
            AuditAction::ActivateOrganization,
            AuditAction::SuspendOrganization,
        ]
    );
}

#[tokio::test]
async fn duplicate_calls_produce_duplicate_records() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();
    let org = harness.api().organization(2).unwrap();

    request_state_change(&org, OrganizationStatus::Active, "Revisión", None, &deps)
        .await
        .unwrap();
    // stale copy still says SUSPENDIDA, so the local table lets it through
    request_state_change(&org, OrganizationStatus::Active, "Revisión", None, &deps)
        .await
        .unwrap();

    assert_eq!(harness.api().audit_records().len(), 2);
}

// ============================================================================
// Backend errors
// ============================================================================

#[tokio::test]
async fn backend_permission_error_propagates_unchanged() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();
    let org = harness.api().organization(1).unwrap();

    harness
        .api()
        .fail_next(ApiError::PermissionDenied("Acceso denegado".to_string()));

    let result =
        request_state_change(&org, OrganizationStatus::Suspended, "Impago", None, &deps).await;

    match result {
        Err(LifecycleError::Api(error)) => {
            assert_eq!(error, ApiError::PermissionDenied("Acceso denegado".to_string()))
        }
        other => panic!("expected permission error, got {:?}", other),
    }
    assert!(harness.api().audit_records().is_empty());
}

#[tokio::test]
async fn missing_organization_is_not_found() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();

    let result = request_state_change_by_id(
        OrganizationId::from_raw(99),
        OrganizationStatus::Suspended,
        "Impago",
        None,
        &deps,
    )
    .await;
    match result {
        Err(LifecycleError::Api(error)) => assert!(error.is_not_found()),
        other => panic!("expected not found, got {:?}", other),
    }

    let mut ghost = harness.api().organization(1).unwrap();
    ghost.id = OrganizationId::from_raw(42);
    let result =
        request_state_change(&ghost, OrganizationStatus::Suspended, "Impago", None, &deps).await;
    assert!(matches!(result, Err(LifecycleError::Api(ApiError::NotFound(_)))));
}

#[tokio::test]
async fn mismatched_state_in_response_is_an_error() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();
    let org = harness.api().organization(1).unwrap();

    harness.api().report_state(OrganizationStatus::Active);

    let result =
        request_state_change(&org, OrganizationStatus::Suspended, "Impago", None, &deps).await;
    assert!(matches!(
        result,
        Err(LifecycleError::StateMismatch {
            requested: OrganizationStatus::Suspended,
            actual: OrganizationStatus::Active,
        })
    ));
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn list_by_state_filters() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();

    let suspended = list_organizations_by_state(OrganizationStatus::Suspended, &deps)
        .await
        .unwrap();
    assert_eq!(suspended.len(), 1);
    assert_eq!(suspended[0].id, OrganizationId::from_raw(2));

    let org = get_organization(OrganizationId::from_raw(1), &deps).await.unwrap();
    request_state_change(&org, OrganizationStatus::Suspended, "Impago", None, &deps)
        .await
        .unwrap();

    let suspended = list_organizations_by_state(OrganizationStatus::Suspended, &deps)
        .await
        .unwrap();
    assert_eq!(suspended.len(), 2);
}

#[tokio::test]
async fn recent_audit_records_respects_limit() {
    let harness = TestHarness::as_super_admin();
    let deps = harness.client_deps();

    let org = harness.api().organization(2).unwrap();
    let org = request_state_change(&org, OrganizationStatus::Active, "Uno", None, &deps)
        .await
        .unwrap();
    let org = request_state_change(&org, OrganizationStatus::Suspended, "Dos", None, &deps)
        .await
        .unwrap();
    request_state_change(&org, OrganizationStatus::Active, "Tres", None, &deps)
        .await
        .unwrap();

    let recent = recent_audit_records(Some(2), &deps).await.unwrap();
    let reasons: Vec<&str> = recent.iter().map(|r| r.motivo.as_str()).collect();
    assert_eq!(reasons, vec!["Tres", "Dos"]);

    let all = recent_audit_records(None, &deps).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.len() <= DEFAULT_AUDIT_LIMIT as usize);
}

#[tokio::test]
async fn audit_log_is_super_admin_only() {
    let harness = TestHarness::as_org_admin();
    let deps = harness.client_deps();

    assert!(matches!(
        recent_audit_records(None, &deps).await,
        Err(LifecycleError::Unauthorized(_))
    ));
    assert!(matches!(
        list_organizations_by_state(OrganizationStatus::Active, &deps).await,
        Err(LifecycleError::Unauthorized(_))
    ));
    assert_eq!(harness.api().call_count(), 0);
}
