//! Notification dispatch for hazardous water-quality assessments.
//!
//! The classifier only computes; whether anyone hears about the result is
//! decided here. Safe assessments are never dispatched. Warning and
//! Critical assessments go to the notification collaborator (an SMS
//! gateway behind the excluded HTTP layer), whose failures are surfaced
//! to the caller unchanged — never retried, never swallowed.

use crate::logging::{self, Component};
use crate::model::{CoreError, HazardAssessment, Severity};

/// Delivery seam for hazard notifications.
///
/// `destination` is a routing token the collaborator understands — for
/// the SMS gateway, the farmer's phone number.
pub trait Notifier {
    fn send(
        &mut self,
        severity: Severity,
        description: &str,
        destination: &str,
    ) -> Result<(), CoreError>;
}

/// Dispatches an assessment if it warrants attention.
///
/// Returns `Ok(true)` if a notification went out, `Ok(false)` for Safe
/// assessments (the notifier is not touched), and the collaborator's own
/// error if delivery failed.
pub fn dispatch_if_hazardous<N: Notifier>(
    notifier: &mut N,
    assessment: &HazardAssessment,
    destination: &str,
) -> Result<bool, CoreError> {
    if assessment.severity < Severity::Warning {
        return Ok(false);
    }

    let description = assessment.description();
    match notifier.send(assessment.severity, &description, destination) {
        Ok(()) => {
            logging::info(
                Component::Alert,
                Some(destination),
                &format!("{} notification sent: {}", assessment.severity, description),
            );
            Ok(true)
        }
        Err(err) => {
            logging::log_upstream_failure(
                Component::Alert,
                Some(destination),
                "notification dispatch",
                &err,
            );
            Err(err)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every send; optionally fails with a fixed error.
    struct RecordingNotifier {
        sent: Vec<(Severity, String, String)>,
        fail_with: Option<CoreError>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            RecordingNotifier {
                sent: Vec::new(),
                fail_with: None,
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn send(
            &mut self,
            severity: Severity,
            description: &str,
            destination: &str,
        ) -> Result<(), CoreError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.sent
                .push((severity, description.to_string(), destination.to_string()));
            Ok(())
        }
    }

    fn warning_assessment() -> HazardAssessment {
        HazardAssessment {
            severity: Severity::Warning,
            hazards: vec!["High turbidity"],
        }
    }

    #[test]
    fn test_safe_assessment_never_touches_the_notifier() {
        let mut notifier = RecordingNotifier::new();
        let assessment = HazardAssessment {
            severity: Severity::Safe,
            hazards: vec![],
        };

        let sent = dispatch_if_hazardous(&mut notifier, &assessment, "+91-98000-00000")
            .expect("safe dispatch cannot fail");
        assert!(!sent);
        assert!(notifier.sent.is_empty());
    }

    #[test]
    fn test_warning_dispatches_once_with_description() {
        let mut notifier = RecordingNotifier::new();

        let sent = dispatch_if_hazardous(&mut notifier, &warning_assessment(), "+91-98000-00000")
            .expect("delivery should succeed");
        assert!(sent);
        assert_eq!(notifier.sent.len(), 1);
        assert_eq!(
            notifier.sent[0],
            (
                Severity::Warning,
                "High turbidity".to_string(),
                "+91-98000-00000".to_string()
            )
        );
    }

    #[test]
    fn test_critical_dispatches_like_warning() {
        let mut notifier = RecordingNotifier::new();
        let assessment = HazardAssessment {
            severity: Severity::Critical,
            hazards: vec!["Critical temperature", "Critical dissolved oxygen"],
        };

        let sent = dispatch_if_hazardous(&mut notifier, &assessment, "+91-98000-00000")
            .expect("delivery should succeed");
        assert!(sent);
        assert_eq!(
            notifier.sent[0].1,
            "Critical temperature, Critical dissolved oxygen"
        );
    }

    #[test]
    fn test_collaborator_error_propagates_unchanged() {
        let gateway_error = CoreError::Upstream {
            collaborator: "sms".to_string(),
            message: "HTTP error: 502".to_string(),
        };
        let mut notifier = RecordingNotifier::new();
        notifier.fail_with = Some(gateway_error.clone());

        let err = dispatch_if_hazardous(&mut notifier, &warning_assessment(), "+91-98000-00000")
            .unwrap_err();
        assert_eq!(err, gateway_error);
    }
}
