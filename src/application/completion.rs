use crate::domain::certificate::{
    Certificate, CertificateData, generate_certificate_number, render_svg, to_data_uri,
};
use crate::domain::ports::{
    CatalogStoreRef, CertificateStoreRef, EnrollmentStoreRef, MailerRef, ProfileStoreRef,
};
use crate::error::{Result, ServiceError};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

/// Finishes an enrollment: stamps completion, issues the certificate
/// artifact, and dispatches it by email.
///
/// Completion and notification are independent concerns: a failed email
/// leaves the enrollment completed and the certificate issued, with only
/// the sent flag left unset.
pub struct CompletionService {
    enrollments: EnrollmentStoreRef,
    certificates: CertificateStoreRef,
    catalog: CatalogStoreRef,
    profiles: ProfileStoreRef,
    mailer: MailerRef,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    pub certificate_number: String,
    pub certificate_url: String,
    pub email_sent: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ProgressOutcome {
    /// Progress stored; nothing else happened.
    Acknowledged,
    /// Progress hit 100. Carries the completion result, or `None` when the
    /// enrollment had already been completed earlier.
    Completed(Option<CompletionOutcome>),
}

impl CompletionService {
    pub fn new(
        enrollments: EnrollmentStoreRef,
        certificates: CertificateStoreRef,
        catalog: CatalogStoreRef,
        profiles: ProfileStoreRef,
        mailer: MailerRef,
    ) -> Self {
        Self {
            enrollments,
            certificates,
            catalog,
            profiles,
            mailer,
        }
    }

    /// Completes an enrollment and issues its certificate.
    ///
    /// Calling this on an already-completed enrollment is a caller bug and
    /// is rejected loudly rather than swallowed.
    pub async fn complete(&self, enrollment_id: Uuid) -> Result<CompletionOutcome> {
        let Some(mut enrollment) = self.enrollments.get(enrollment_id).await? else {
            return Err(ServiceError::NotFound("Enrollment"));
        };
        if enrollment.completed {
            return Err(ServiceError::AlreadyCompleted);
        }

        let course = match enrollment.course_id {
            Some(id) => self.catalog.get_course(id).await?,
            None => None,
        };
        let tour = match enrollment.tour_id {
            Some(id) => self.catalog.get_tour(id).await?,
            None => None,
        };
        let program_name = course
            .map(|c| c.title)
            .or(tour.map(|t| t.title))
            .unwrap_or_else(|| "Program".to_string());

        let profile = self.profiles.find_by_user(enrollment.user_id).await?;
        let student_name = profile
            .as_ref()
            .map(|p| p.full_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Student".to_string());

        let now = Utc::now();
        enrollment.completed = true;
        enrollment.progress = 100;
        enrollment.completed_at = Some(now);
        let user_id = enrollment.user_id;
        self.enrollments.update(enrollment).await?;

        let certificate_number = generate_certificate_number(now);
        let completion_date = now.format("%B %-d, %Y").to_string();
        let svg = render_svg(&CertificateData {
            student_name: &student_name,
            program_name: &program_name,
            completion_date: &completion_date,
            certificate_number: &certificate_number,
        });
        let certificate_url = to_data_uri(&svg);

        self.certificates
            .insert(Certificate {
                id: Uuid::new_v4(),
                enrollment_id,
                user_id,
                certificate_number: certificate_number.clone(),
                certificate_url: certificate_url.clone(),
                issued_at: now,
            })
            .await?;
        info!(enrollment = %enrollment_id, certificate = %certificate_number, "certificate issued");

        let recipient = profile.map(|p| p.email).unwrap_or_default();
        let email_sent = match self
            .mailer
            .send_certificate(&recipient, &student_name, &program_name, &certificate_url)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                // Best-effort: the completion stands even when the notice
                // cannot be delivered.
                warn!(enrollment = %enrollment_id, error = %err, "certificate email failed");
                false
            }
        };

        if email_sent
            && let Some(mut enrollment) = self.enrollments.get(enrollment_id).await?
        {
            enrollment.certificate_sent = true;
            enrollment.certificate_sent_at = Some(Utc::now());
            self.enrollments.update(enrollment).await?;
        }

        Ok(CompletionOutcome {
            certificate_number,
            certificate_url,
            email_sent,
        })
    }

    /// Stores a progress value and completes the enrollment when it reaches
    /// exactly 100. Values outside [0,100] are rejected, not clamped;
    /// lowering progress is allowed.
    pub async fn update_progress(
        &self,
        enrollment_id: Uuid,
        progress: i64,
    ) -> Result<ProgressOutcome> {
        if !(0..=100).contains(&progress) {
            return Err(ServiceError::validation(
                "Progress must be between 0 and 100",
            ));
        }

        let Some(mut enrollment) = self.enrollments.get(enrollment_id).await? else {
            return Err(ServiceError::NotFound("Enrollment"));
        };
        enrollment.progress = progress as u8;
        self.enrollments.update(enrollment).await?;

        if progress == 100 {
            match self.complete(enrollment_id).await {
                Ok(outcome) => Ok(ProgressOutcome::Completed(Some(outcome))),
                Err(ServiceError::AlreadyCompleted) => Ok(ProgressOutcome::Completed(None)),
                Err(err) => Err(err),
            }
        } else {
            Ok(ProgressOutcome::Acknowledged)
        }
    }
}
