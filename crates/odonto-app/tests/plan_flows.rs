mod common;

use common::{FakeCash, FakeClinic, PATIENT_ID, plan_item};

use odonto_app::{AppError, PatientWorkspace, PendingProposal};
use odonto_core::error::CoreError;
use odonto_core::models::cash::{MovementConcept, MovementNature, PaymentMethod};
use odonto_core::models::odontogram::OdontogramStatus;
use odonto_core::models::tooth::{ToothCode, ToothSurface};
use odonto_core::models::treatment_plan::{TreatmentProcedure, TreatmentStatus};

fn tooth(code: &str) -> ToothCode {
    code.parse().unwrap()
}

async fn workspace_with_suggestion(clinic: &FakeClinic) -> PatientWorkspace {
    let mut ws = PatientWorkspace::load(clinic, PATIENT_ID).await.unwrap();
    ws.record_finding(
        clinic,
        tooth("16"),
        ToothSurface::Occlusal,
        OdontogramStatus::Caries,
        "deep lesion",
    )
    .await
    .unwrap();
    assert!(matches!(
        ws.pending(),
        Some(PendingProposal::SuggestPlanItem(_))
    ));
    ws
}

#[tokio::test]
async fn accepting_a_suggestion_creates_a_planned_item() {
    let clinic = FakeClinic::default();
    let mut ws = workspace_with_suggestion(&clinic).await;

    let item = ws
        .accept_plan_suggestion(&clinic, "12000")
        .await
        .unwrap()
        .clone();
    assert_eq!(item.procedure, TreatmentProcedure::Filling);
    assert_eq!(item.status, TreatmentStatus::Planned);
    assert_eq!(item.tooth_code, Some(tooth("16")));
    assert_eq!(item.surface, Some(ToothSurface::Occlusal));
    assert_eq!(item.estimated_cost, "12000");
    assert_eq!(item.notes.as_deref(), Some("deep lesion"));

    assert!(ws.pending().is_none());
    assert_eq!(ws.plan.len(), 1);
}

#[tokio::test]
async fn suggestion_without_cost_stays_pending() {
    let clinic = FakeClinic::default();
    let mut ws = workspace_with_suggestion(&clinic).await;

    let err = ws.accept_plan_suggestion(&clinic, "  ").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(CoreError::MissingEstimatedCost)
    ));
    // The form can be corrected and resubmitted.
    assert!(ws.pending().is_some());
    assert_eq!(clinic.call_count("create_plan_item"), 0);

    ws.accept_plan_suggestion(&clinic, "12000").await.unwrap();
    assert_eq!(ws.plan.len(), 1);
}

#[tokio::test]
async fn declining_a_suggestion_creates_nothing() {
    let clinic = FakeClinic::default();
    let mut ws = workspace_with_suggestion(&clinic).await;

    ws.decline_pending();

    assert!(ws.pending().is_none());
    assert!(ws.plan.is_empty());
    assert_eq!(clinic.call_count("create_plan_item"), 0);
}

#[tokio::test]
async fn manual_item_with_surface_but_no_tooth_is_rejected() {
    let clinic = FakeClinic::default();
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();

    let err = ws
        .add_plan_item(
            &clinic,
            TreatmentProcedure::Cleaning,
            None,
            Some(ToothSurface::Occlusal),
            "8000",
            "",
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(CoreError::SurfaceWithoutTooth)
    ));
    assert_eq!(clinic.call_count("create_plan_item"), 0);
}

#[tokio::test]
async fn advance_walks_planned_to_completed() {
    let clinic = FakeClinic::default();
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();
    let id = ws
        .add_plan_item(
            &clinic,
            TreatmentProcedure::Filling,
            Some(tooth("16")),
            Some(ToothSurface::Occlusal),
            "15000",
            "",
        )
        .await
        .unwrap()
        .id;

    assert!(ws.advance_plan_item(&clinic, id).await.unwrap());
    assert_eq!(ws.plan[0].status, TreatmentStatus::InProgress);
    assert!(ws.pending().is_none());

    assert!(ws.advance_plan_item(&clinic, id).await.unwrap());
    assert_eq!(ws.plan[0].status, TreatmentStatus::Completed);

    // Completion of a chartable procedure offers to reflect it.
    match ws.pending() {
        Some(PendingProposal::ApplyToOdontogram {
            status, surface, ..
        }) => {
            assert_eq!(*status, OdontogramStatus::Filling);
            assert_eq!(*surface, ToothSurface::Occlusal);
        }
        other => panic!("expected apply-to-chart proposal, got {other:?}"),
    }
}

#[tokio::test]
async fn advance_on_terminal_item_issues_no_request() {
    let clinic = FakeClinic::default();
    clinic.seed_plan_item(plan_item(
        9,
        TreatmentProcedure::Cleaning,
        TreatmentStatus::Completed,
        None,
        None,
    ));
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();

    assert!(!ws.advance_plan_item(&clinic, 9).await.unwrap());
    assert!(!ws.advance_plan_item(&clinic, 404).await.unwrap());
    assert_eq!(clinic.call_count("update_plan_status"), 0);
}

#[tokio::test]
async fn rejected_status_change_rolls_back() {
    let clinic = FakeClinic::default();
    clinic.seed_plan_item(plan_item(
        3,
        TreatmentProcedure::Filling,
        TreatmentStatus::Planned,
        Some("16"),
        Some(ToothSurface::Occlusal),
    ));
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();
    clinic.fail_status_update(true);

    let err = ws.advance_plan_item(&clinic, 3).await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(ws.plan[0].status, TreatmentStatus::Planned);
    assert_eq!(clinic.call_count("update_plan_status"), 1);
}

#[tokio::test]
async fn completed_whole_tooth_procedure_reflects_on_general() {
    let clinic = FakeClinic::default();
    clinic.seed_plan_item(plan_item(
        5,
        TreatmentProcedure::Extraction,
        TreatmentStatus::InProgress,
        Some("28"),
        Some(ToothSurface::Occlusal),
    ));
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();

    assert!(ws.advance_plan_item(&clinic, 5).await.unwrap());

    match ws.pending() {
        Some(PendingProposal::ApplyToOdontogram {
            status, surface, ..
        }) => {
            assert_eq!(*status, OdontogramStatus::Extracted);
            assert_eq!(*surface, ToothSurface::General);
        }
        other => panic!("expected apply-to-chart proposal, got {other:?}"),
    }
}

#[tokio::test]
async fn completing_a_non_chartable_procedure_offers_nothing() {
    let clinic = FakeClinic::default();
    clinic.seed_plan_item(plan_item(
        6,
        TreatmentProcedure::Whitening,
        TreatmentStatus::InProgress,
        None,
        None,
    ));
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();

    assert!(ws.advance_plan_item(&clinic, 6).await.unwrap());
    assert!(ws.pending().is_none());
}

#[tokio::test]
async fn apply_to_chart_writes_the_finding_and_offers_a_charge() {
    let clinic = FakeClinic::default();
    let cash = FakeCash::default();
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();
    let id = ws
        .add_plan_item(
            &clinic,
            TreatmentProcedure::Filling,
            Some(tooth("16")),
            Some(ToothSurface::Occlusal),
            "15000",
            "",
        )
        .await
        .unwrap()
        .id;
    ws.advance_plan_item(&clinic, id).await.unwrap();
    ws.advance_plan_item(&clinic, id).await.unwrap();

    ws.accept_apply_to_chart(&clinic).await.unwrap();

    assert_eq!(
        ws.chart.status_of(&tooth("16"), ToothSurface::Occlusal),
        OdontogramStatus::Filling
    );
    assert_eq!(ws.events.len(), 1);
    assert_eq!(ws.events[0].to_status, Some(OdontogramStatus::Filling));

    let Some(PendingProposal::RegisterCharge(p)) = ws.pending() else {
        panic!("expected a charge proposal");
    };
    assert_eq!(p.concept, MovementConcept::Filling);
    assert_eq!(p.patient_id, PATIENT_ID);
    assert_eq!(p.amount, "15000");
    assert!(p.description.contains("Tooth 16"));

    let movement = ws
        .accept_charge(&cash, PaymentMethod::Card, None)
        .await
        .unwrap();
    assert_eq!(movement.movement_nature, MovementNature::Income);
    assert_eq!(movement.amount, "15000");
    assert_eq!(movement.patient_id, Some(PATIENT_ID));
    assert!(ws.pending().is_none());
    assert_eq!(cash.call_count("create_movement"), 1);
}

#[tokio::test]
async fn charge_prefers_final_cost_and_accepts_an_override() {
    let clinic = FakeClinic::default();
    let cash = FakeCash::default();
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();
    let id = ws
        .add_plan_item(
            &clinic,
            TreatmentProcedure::Crown,
            Some(tooth("11")),
            None,
            "40000",
            "",
        )
        .await
        .unwrap()
        .id;
    ws.edit_plan_item(&clinic, id, Some("42500.50".to_string()), None)
        .await
        .unwrap();
    ws.advance_plan_item(&clinic, id).await.unwrap();
    ws.advance_plan_item(&clinic, id).await.unwrap();
    ws.accept_apply_to_chart(&clinic).await.unwrap();

    let Some(PendingProposal::RegisterCharge(p)) = ws.pending() else {
        panic!("expected a charge proposal");
    };
    assert_eq!(p.amount, "42500.50");

    // Empty override is rejected and the proposal survives.
    let err = ws
        .accept_charge(&cash, PaymentMethod::Cash, Some(" "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(CoreError::MissingAmount)));
    assert!(ws.pending().is_some());
    assert_eq!(cash.call_count("create_movement"), 0);

    let movement = ws
        .accept_charge(&cash, PaymentMethod::Cash, Some("40000"))
        .await
        .unwrap();
    assert_eq!(movement.amount, "40000");
}

#[tokio::test]
async fn declining_the_charge_records_no_movement() {
    let clinic = FakeClinic::default();
    let cash = FakeCash::default();
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();
    let id = ws
        .add_plan_item(
            &clinic,
            TreatmentProcedure::Filling,
            Some(tooth("16")),
            Some(ToothSurface::Occlusal),
            "15000",
            "",
        )
        .await
        .unwrap()
        .id;
    ws.advance_plan_item(&clinic, id).await.unwrap();
    ws.advance_plan_item(&clinic, id).await.unwrap();
    ws.accept_apply_to_chart(&clinic).await.unwrap();

    ws.decline_pending();

    // The chart keeps the finding; only the charge was abandoned.
    assert_eq!(
        ws.chart.status_of(&tooth("16"), ToothSurface::Occlusal),
        OdontogramStatus::Filling
    );
    assert_eq!(cash.call_count("create_movement"), 0);
}

#[tokio::test]
async fn cancelled_items_cannot_be_edited() {
    let clinic = FakeClinic::default();
    clinic.seed_plan_item(plan_item(
        7,
        TreatmentProcedure::Filling,
        TreatmentStatus::Cancelled,
        Some("16"),
        Some(ToothSurface::Occlusal),
    ));
    let mut ws = PatientWorkspace::load(&clinic, PATIENT_ID).await.unwrap();

    let err = ws
        .edit_plan_item(&clinic, 7, Some("1".to_string()), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::PlanItemCancelled));
    assert_eq!(clinic.call_count("update_plan_item"), 0);
}
