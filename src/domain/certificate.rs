use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable proof of completion, tied 1:1 to a completed enrollment.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub user_id: Uuid,
    pub certificate_number: String,
    pub certificate_url: String,
    pub issued_at: DateTime<Utc>,
}

/// Collision-resistant certificate number: issuance timestamp plus a random
/// suffix, unique by store constraint.
pub fn generate_certificate_number(issued_at: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_uppercase();
    format!("CERT-{}-{}", issued_at.timestamp_millis(), suffix)
}

pub struct CertificateData<'a> {
    pub student_name: &'a str,
    pub program_name: &'a str,
    pub completion_date: &'a str,
    pub certificate_number: &'a str,
}

/// Renders the certificate as a self-contained 1200x850 SVG so no file
/// storage is involved; callers embed it via [`to_data_uri`].
pub fn render_svg(data: &CertificateData<'_>) -> String {
    format!(
        r##"<svg width="1200" height="850" xmlns="http://www.w3.org/2000/svg">
  <rect width="1200" height="850" fill="#FFFFFF"/>
  <rect x="40" y="40" width="1120" height="770" fill="none" stroke="#1F2A44" stroke-width="8"/>
  <rect x="50" y="50" width="1100" height="750" fill="none" stroke="#C9A227" stroke-width="4"/>
  <text x="600" y="300" font-family="Georgia, serif" font-size="48" font-weight="bold" fill="#1F2A44" text-anchor="middle">CERTIFICATE OF COMPLETION</text>
  <text x="600" y="350" font-family="Arial, sans-serif" font-size="20" fill="#666666" text-anchor="middle">This is to certify that</text>
  <text x="600" y="420" font-family="Georgia, serif" font-size="56" font-weight="bold" fill="#1F2A44" text-anchor="middle">{student}</text>
  <line x1="300" y1="440" x2="900" y2="440" stroke="#1F2A44" stroke-width="2"/>
  <text x="600" y="500" font-family="Arial, sans-serif" font-size="20" fill="#666666" text-anchor="middle">has successfully completed</text>
  <text x="600" y="550" font-family="Georgia, serif" font-size="36" font-weight="bold" fill="#1F2A44" text-anchor="middle">{program}</text>
  <text x="600" y="620" font-family="Arial, sans-serif" font-size="18" fill="#666666" text-anchor="middle">on {date}</text>
  <text x="600" y="790" font-family="Arial, sans-serif" font-size="12" fill="#999999" text-anchor="middle">Certificate No: {number}</text>
</svg>"##,
        student = data.student_name,
        program = data.program_name,
        date = data.completion_date,
        number = data.certificate_number,
    )
}

pub fn to_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
