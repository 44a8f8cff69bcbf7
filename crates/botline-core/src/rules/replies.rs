//! Fixed reply texts and the fallback persona prompt.

/// Sent when the same exact text arrives more than the allowed number of times.
pub const REPETITION_NOTICE: &str = "You have sent the same message several times. \
Repeated messaging amounts to harassment under the RBI Fair Practices Code for recovery agents. \
Please put your query in writing once and it will be answered.";

/// Sent for greetings and very short messages.
pub const UNAVAILABLE: &str =
    "Hi, I am currently unavailable. Please leave your message and I will get back to you.";

/// Appended to the first greeting reply of a session.
pub const SIGNATURE: &str = "\n\n- Sent by an automated assistant";

/// Sent when a message contains coercive or threatening language.
pub const THREAT_NOTICE: &str = "Please note: under the RBI Master Circular on Fair Practices Code \
(Recovery Agents, para 2.5), threats, intimidation, and visits to a borrower's home, workplace or \
family are prohibited. This conversation is being recorded. Kindly keep all communication in writing.";

/// Sent after a sender names their institution.
pub const ASK_FOR_DOCUMENT: &str = "Thank you for confirming the institution. \
Would you like me to share the supporting documents regarding this account?";

/// Sent after the documents have been attached.
pub const DOCUMENTS_SENT: &str = "I have shared the documents above. They explain my current \
financial situation and my request for a revised repayment plan. Kindly review them and respond in writing.";

/// Sent when document delivery fails.
pub const DOCUMENTS_FAILED: &str =
    "Sorry, I could not send the documents right now. Please reply again a little later to receive them.";

/// Sent the first time a sender reaches the bank question.
pub const ASK_BANK: &str =
    "Hello, may I know which bank or financial institution you are contacting me on behalf of?";

/// Sent by the webhook when anything goes wrong.
pub const WEBHOOK_APOLOGY: &str = "An error occurred. Please try again later.";

/// System instruction for the conversation fallback.
pub const PERSONA_PROMPT: &str = "You are an assistant replying on WhatsApp on behalf of a borrower \
who is currently unavailable. The person messaging is usually a bank or loan recovery representative. \
Reply politely in at most three short sentences. Never admit liability, never promise a payment date \
or amount, and never share personal, family or workplace details. Ask that all communication be \
made in writing. If the message is abusive or threatening, remind them of the RBI Fair Practices Code.";

/// Sent when the completion service fails, listing the numbers to call instead.
pub fn unavailable_with_contacts(contact_numbers: &[String]) -> String {
    if contact_numbers.is_empty() {
        return "I am unable to respond right now. Please try again later.".to_string();
    }
    format!(
        "I am unable to respond right now. For anything urgent please contact {}.",
        contact_numbers.join(" or ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_with_contacts_lists_numbers() {
        let text = unavailable_with_contacts(&["+91 1".to_string(), "+91 2".to_string()]);
        assert!(text.contains("+91 1 or +91 2"));
    }

    #[test]
    fn test_unavailable_without_contacts() {
        let text = unavailable_with_contacts(&[]);
        assert!(text.starts_with("I am unable to respond right now"));
    }
}
