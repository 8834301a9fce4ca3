//! Guardian notification content

use super::traits::EmailMessage;

/// Email announcing a new report, with plain text and HTML bodies
pub fn guardian_email(to: &str, student_name: &str, semester: u32, url: &str) -> EmailMessage {
    let text_body = format!(
        "Dear Guardian,\n\nA new semester {} report is available for {}.\nView it here: {}\n\n\
         The link works once and expires automatically.",
        semester, student_name, url
    );

    let name = escape_html(student_name);
    let href = escape_html(url);
    let html_body = format!(
        r#"<!doctype html>
<html>
  <head><meta charset="UTF-8" /><title>Academic Update</title></head>
  <body style="margin: 0; padding: 40px 20px; background-color: #f8fafc; font-family: 'Segoe UI', Tahoma, sans-serif;">
    <table width="100%" style="max-width: 480px; margin: 0 auto; background: #ffffff; border-radius: 12px;">
      <tr><td style="background: #0ea5e9; padding: 24px; text-align: center;">
        <h1 style="margin: 0; color: #ffffff; font-size: 24px;">Academic Update</h1>
      </td></tr>
      <tr><td style="padding: 32px 28px; color: #334155;">
        <p>Dear Guardian,</p>
        <p>A new semester {semester} report is available for <strong>{name}</strong>.</p>
        <p style="text-align: center;">
          <a href="{href}" style="display: inline-block; padding: 12px 24px; background-color: #0ea5e9; color: #ffffff; text-decoration: none; border-radius: 6px;">View Report</a>
        </p>
        <p style="color: #64748b; font-size: 13px; text-align: center;">
          This link can be opened once and expires automatically. If you have any questions, please contact the administration.
        </p>
      </td></tr>
    </table>
  </body>
</html>"#
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("Academic Update for {}", student_name),
        text_body,
        html_body,
    }
}

/// Short SMS body carrying the report link
pub fn guardian_sms(student_name: &str, semester: u32, url: &str) -> String {
    format!(
        "Semester {} report for {} is ready. View once: {}",
        semester, student_name, url
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
