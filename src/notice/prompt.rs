//! Prompt construction for the completion service.

use super::models::NoticeRequest;

/// Number of days the recipient is given to comply.
pub const DEMAND_PERIOD_DAYS: u32 = 15;

const PERSONA: &str = "You are a senior legal expert in Indian law with 20 years of experience drafting formal legal notices.";

const DISCLAIMER: &str = "Note: This notice has been generated for informational purposes. Please consult a qualified advocate before sending.";

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word is a run of letters; any other character (digits, spaces,
/// punctuation) starts a new word, so `"o'brien"` becomes `"O'Brien"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

/// Request fields normalised for the template.
struct PromptFields<'a> {
    notice_type: &'a str,
    sender_name: String,
    sender_address: String,
    recipient_name: String,
    recipient_address: String,
    issue_description: &'a str,
    amount: &'a str,
    incident_date: &'a str,
}

impl<'a> PromptFields<'a> {
    fn from_request(request: &'a NoticeRequest) -> Self {
        Self {
            notice_type: &request.notice_type,
            sender_name: title_case(&request.sender_name),
            sender_address: title_case(&request.sender_address),
            recipient_name: title_case(&request.recipient_name),
            recipient_address: title_case(&request.recipient_address),
            issue_description: &request.issue_description,
            amount: &request.amount,
            incident_date: &request.incident_date,
        }
    }
}

/// The block listing every submitted detail once.
pub fn details_block(request: &NoticeRequest) -> String {
    render_details(&PromptFields::from_request(request))
}

fn render_details(f: &PromptFields<'_>) -> String {
    format!(
        "Notice Type: {}\n\
         Sender Name: {}\n\
         Sender Address: {}\n\
         Recipient Name: {}\n\
         Recipient Address: {}\n\
         Issue Description: {}\n\
         Amount Involved (if any): {}\n\
         Date of Incident: {}",
        f.notice_type,
        f.sender_name,
        f.sender_address,
        f.recipient_name,
        f.recipient_address,
        f.issue_description,
        f.amount,
        f.incident_date,
    )
}

/// Build the full instruction sent to the completion service.
pub fn build_prompt(request: &NoticeRequest) -> String {
    let f = PromptFields::from_request(request);

    format!(
        r#"
{persona}
Generate a professional legal notice based on the following details:

{details}

STRICT FORMATTING RULES:
- Start exactly like this, no square brackets:

{sender_name}
{sender_address}

Date: {incident_date}

To,
{recipient_name}
{recipient_address}

Subject: Legal Notice for {notice_type}

Dear {recipient_name},

- Then write 3 full paragraphs as the body of the notice
- Each paragraph must be 3-5 complete sentences, flowing naturally
- Do NOT break sentences into short lines
- Do NOT use square brackets anywhere
- Cite relevant Indian law (Indian Contract Act 1872, Consumer Protection Act, etc.)
- Include a clear demand with a {days}-day deadline
- Include consequences if ignored
- End with a professional closing:

Yours sincerely,
{sender_name}

{disclaimer}
"#,
        persona = PERSONA,
        details = render_details(&f),
        sender_name = f.sender_name,
        sender_address = f.sender_address,
        incident_date = f.incident_date,
        recipient_name = f.recipient_name,
        recipient_address = f.recipient_address,
        notice_type = f.notice_type,
        days = DEMAND_PERIOD_DAYS,
        disclaimer = DISCLAIMER,
    )
}
