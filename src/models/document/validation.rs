use super::types::{Document, DocumentType};
use crate::errors::AppError;
use crate::validate::{self, FieldErrors};

/// Field rules shared by create and edit. Every error is reported at once.
pub fn validate_document(doc: &Document) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.add("title", validate::validate_required(&doc.title, "Title", 200));
    errors.add("description", validate::validate_required(&doc.description, "Description", 5000));
    errors.add("objectives", validate::validate_required(&doc.objectives, "Objectives", 5000));
    errors.add("scope", validate::validate_optional(Some(&doc.scope), "Scope", 5000));
    errors.add(
        "initiatingService",
        validate::validate_required(&doc.initiating_service, "Initiating service", 200),
    );
    errors.add("initiator", validate::validate_required(&doc.initiator, "Initiator", 200));
    errors.add(
        "budgetEstimated",
        validate::validate_non_negative(doc.budget_estimated, "Estimated budget"),
    );
    errors.add("budgetMin", validate::validate_non_negative(doc.budget_min, "Minimum budget"));
    errors.add("budgetMax", validate::validate_non_negative(doc.budget_max, "Maximum budget"));
    errors.add("budgetMin", validate::validate_range(doc.budget_min, doc.budget_max));
    errors.add(
        "timeline",
        validate::validate_dates(doc.timeline.start_date, doc.timeline.end_date),
    );

    if doc.document_type == DocumentType::Fp {
        errors.add(
            "projectManager",
            validate::validate_present(doc.project_manager.as_deref(), "Project manager"),
        );
        errors.add("sponsor", validate::validate_present(doc.sponsor.as_deref(), "Sponsor"));
    }

    errors.into_result()
}
