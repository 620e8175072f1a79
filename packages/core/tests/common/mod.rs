//! Shared setup for the core integration tests.

#![allow(dead_code)]

use alma_core::common::auth::Role;
use alma_core::domains::organization::OrganizationStatus;
use alma_core::kernel::test_dependencies::{MockAlmaApi, TestDependencies};
use alma_core::kernel::ClientDeps;

pub const SUPER_ADMIN_EMAIL: &str = "superadmin@alma.es";
pub const ORG_ADMIN_EMAIL: &str = "admin@centroalma.es";
pub const PROFESSIONAL_EMAIL: &str = "psi@centroalma.es";

pub const PROFESSIONAL_ID: i64 = 10;
pub const PATIENT_ID: i64 = 20;
pub const OTHER_PATIENT_ID: i64 = 21;

pub struct TestHarness {
    pub deps: TestDependencies,
}

impl TestHarness {
    /// Backend seeded with one organization per operational state:
    /// 1 = ACTIVA, 2 = SUSPENDIDA, 3 = BAJA. One professional and two
    /// patients are available for assignments.
    pub fn seeded_api() -> MockAlmaApi {
        MockAlmaApi::new()
            .with_organization(1, OrganizationStatus::Active)
            .with_organization(2, OrganizationStatus::Suspended)
            .with_organization(3, OrganizationStatus::Deregistered)
            .with_professional(PROFESSIONAL_ID, "Ana")
            .with_patient(PATIENT_ID, "Marta")
            .with_patient(OTHER_PATIENT_ID, "Jorge")
    }

    pub fn as_super_admin() -> Self {
        Self::signed_in(SUPER_ADMIN_EMAIL, Role::SuperAdmin)
    }

    pub fn as_org_admin() -> Self {
        Self::signed_in(ORG_ADMIN_EMAIL, Role::AdminOrganizacion)
    }

    pub fn as_professional() -> Self {
        Self::signed_in(PROFESSIONAL_EMAIL, Role::Profesional)
    }

    pub fn signed_in(email: &str, role: Role) -> Self {
        Self {
            deps: TestDependencies::new()
                .mock_api(Self::seeded_api())
                .signed_in(email, role),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            deps: TestDependencies::new().mock_api(Self::seeded_api()),
        }
    }

    pub fn client_deps(&self) -> ClientDeps {
        self.deps.into_deps()
    }

    pub fn api(&self) -> &MockAlmaApi {
        &self.deps.api
    }
}
