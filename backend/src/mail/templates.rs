use crate::mail::EmailMessage;

pub fn welcome(from: &str, to: &str, full_name: &str) -> EmailMessage {
    let html = format!(
        "<p>Hi {name},</p>\
         <p>Welcome to GlamHunt! We have received your registration and our team will review it shortly.</p>\
         <p>We will let you know by e-mail as soon as a decision has been made.</p>\
         <p>Best regards,<br/>The GlamHunt Team</p>",
        name = escape_html(full_name)
    );

    EmailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: "Welcome to GlamHunt!".to_string(),
        html,
    }
}

pub fn admin_reply(from: &str, to: &str, original_subject: &str, reply: &str) -> EmailMessage {
    let html = format!(
        "<p>Hello,</p>\
         <p>Thank you for contacting GlamHunt. Here is a response regarding your inquiry: \"{subject}\".</p>\
         <blockquote>{reply}</blockquote>\
         <p>If you have any further questions, please feel free to reply to this email.</p>\
         <p>Best regards,<br/>The GlamHunt Admin Team</p>",
        subject = escape_html(original_subject),
        reply = escape_html(reply).replace('\n', "<br/>")
    );

    EmailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("Re: {}", original_subject),
        html,
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
