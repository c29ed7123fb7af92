//! Regex patterns for ETS work-order extraction.
//!
//! Each field has several candidates, listed here in the order the
//! extractor tries them.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Order number
    pub static ref ORDER_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)Order Number:\s*([A-Z0-9-]+)"
    ).unwrap();

    pub static ref ORDER_NUMBER_PO: Regex = Regex::new(
        r"\b(PO\d[A-Z0-9-]*)\b"
    ).unwrap();

    pub static ref ORDER_NUMBER_WORK_ORDER: Regex = Regex::new(
        r"(?i)Work Order:\s*([A-Z0-9-]+)"
    ).unwrap();

    // Dates (4 Jun 2024, 04/06/2024, 2024-06-04)
    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"\b(\d{1,2}\s+[A-Za-z]{3}\s+\d{4})\b"
    ).unwrap();

    pub static ref DATE_SLASHED: Regex = Regex::new(
        r"\b(\d{1,2}/\d{1,2}/\d{4})\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4}-\d{2}-\d{2})\b"
    ).unwrap();

    // Contractor; the upper-case name may wrap onto the next line
    pub static ref CONTRACTOR_TO_BLOCK: Regex = Regex::new(
        r"To:\s*([A-Z\s&]+?)(?:\s+ETS Phone|Phone:|Address:|$)"
    ).unwrap();

    pub static ref CONTRACTOR_TO_LINE: Regex = Regex::new(
        r"(?m)To:[ \t]*([A-Z][A-Z &]*?)[ \t]*$"
    ).unwrap();

    pub static ref CONTRACTOR_LABELED: Regex = Regex::new(
        r"Contractor:\s*(.+?)(?:\n|$)"
    ).unwrap();

    pub static ref CONTRACTOR_ASSIGNED: Regex = Regex::new(
        r"(?i)Assigned to:\s*(.+?)(?:\n|$)"
    ).unwrap();

    // Site contact name
    pub static ref CONTACT_CUSTOMER_DETAILS: Regex = Regex::new(
        r"(?s)Customer Details:\s*(.+?)(?:\n|Site Address:|Customer Phone:)"
    ).unwrap();

    pub static ref CONTACT_LABELED: Regex = Regex::new(
        r"Contact:\s*(.+?)(?:\n|Phone:|Address:|$)"
    ).unwrap();

    pub static ref CONTACT_CUSTOMER: Regex = Regex::new(
        r"Customer:\s*(.+?)(?:\n|Phone:|Address:|$)"
    ).unwrap();

    pub static ref CONTACT_SITE: Regex = Regex::new(
        r"(?i)Site Contact:\s*(.+?)(?:\n|Phone:|Address:|$)"
    ).unwrap();

    // Site address
    pub static ref ADDRESS_SITE: Regex = Regex::new(
        r"(?s)Site Address:\s*(.+?)(?:\n|Customer Phone:|Phone:|$)"
    ).unwrap();

    pub static ref ADDRESS_LABELED: Regex = Regex::new(
        r"(?s)Address:\s*(.+?)(?:\n|Phone:|Contact:|$)"
    ).unwrap();

    pub static ref ADDRESS_LOCATION: Regex = Regex::new(
        r"(?s)Location:\s*(.+?)(?:\n|Phone:|Contact:|$)"
    ).unwrap();

    // Site contact phone
    pub static ref PHONE_CUSTOMER: Regex = Regex::new(
        r"Customer Phone:\s*(.+?)(?:\n|$)"
    ).unwrap();

    pub static ref PHONE_LABELED: Regex = Regex::new(
        r"Phone:\s*(.+?)(?:\n|$)"
    ).unwrap();

    pub static ref PHONE_MOBILE: Regex = Regex::new(
        r"Mobile:\s*(.+?)(?:\n|$)"
    ).unwrap();

    pub static ref PHONE_NEAR_CONTACT: Regex = Regex::new(
        r"(?i)Contact.*?(\d{4}\s?\d{3}\s?\d{3})"
    ).unwrap();

    pub static ref PHONE_STANDALONE: Regex = Regex::new(
        r"(\d{4}\s?\d{3}\s?\d{3})"
    ).unwrap();

    // Job description, up to a blank line or the next section
    pub static ref DESCRIPTION_CLIENT_INSTRUCTIONS: Regex = Regex::new(
        r"(?s)Client Instructions\s+(.+?)(?:\n[ \t]*\n|All amounts shown|Scope of Works|$)"
    ).unwrap();

    pub static ref DESCRIPTION_LABELED: Regex = Regex::new(
        r"(?s)Job Description:\s*(.+?)(?:\n[ \t]*\n|All amounts shown|Scope of Works|$)"
    ).unwrap();

    pub static ref DESCRIPTION_PLEASE_ATTEND: Regex = Regex::new(
        r"(?s)(Please attend.+?)(?:\n[ \t]*\n|All amounts shown|Scope of Works|$)"
    ).unwrap();

    pub static ref DESCRIPTION_WORK_REQUIRED: Regex = Regex::new(
        r"(?s)Work Required:\s*(.+?)(?:\n[ \t]*\n|All amounts shown|Scope of Works|$)"
    ).unwrap();

    // Estimated value
    pub static ref VALUE_TOTAL_AUD: Regex = Regex::new(
        r"(?i)Total AUD.*?\$([0-9,]+\.?\d*)"
    ).unwrap();

    pub static ref VALUE_LABELED: Regex = Regex::new(
        r"(?i)Value.*?\$([0-9,]+\.?\d*)"
    ).unwrap();

    pub static ref VALUE_DOLLAR: Regex = Regex::new(
        r"\$(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)"
    ).unwrap();

    // Cost limit sentence
    pub static ref COST_LIMIT: Regex = Regex::new(
        r"(?i)(cost limit.*?\$\d+[^.])"
    ).unwrap();

    // Scope-of-works task markers ("1.1", "1.2."); group 1 at line start,
    // group 2 mid-line
    pub static ref TASK_MARKER: Regex = Regex::new(
        r"(?m)(?:^[ \t]*(\d{1,2}\.\d{1,2})\.?|[ \t](\d{1,2}\.\d{1,2})\.?)[ \t]+"
    ).unwrap();

    pub static ref TASK_TERMINATOR: Regex = Regex::new(
        r"\n[ \t]*\n|All amounts shown"
    ).unwrap();

    // Partner contact channels
    pub static ref ETS_PHONE: Regex = Regex::new(
        r"1300\s?755\s?455"
    ).unwrap();

    pub static ref ETS_EMAIL: Regex = Regex::new(
        r"(?i)admin@etsaus\.com\.au"
    ).unwrap();

    // Label spill-over stripped from captured values
    pub static ref PHONE_LABEL_TAIL: Regex = Regex::new(
        r"(?is)Phone:.*$"
    ).unwrap();

    pub static ref ADDRESS_LABEL_TAIL: Regex = Regex::new(
        r"(?is)Address:.*$"
    ).unwrap();

    pub static ref CONTACT_LABEL_TAIL: Regex = Regex::new(
        r"(?is)Contact:.*$"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}
