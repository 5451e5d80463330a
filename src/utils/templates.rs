//! Shared email layout.
//!
//! Every outgoing HTML email carries the same header and footer with the
//! corporate logo referenced as an inline attachment by content-id.

use crate::infra::mailer::LOGO_CONTENT_ID;

/// Wrap body HTML in the shared header/footer layout.
pub fn wrap_html(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="margin:0;padding:0;background:#f4f5f7;font-family:Arial,Helvetica,sans-serif;">
  <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
    <tr><td align="center" style="padding:24px;">
      <table role="presentation" width="600" cellpadding="0" cellspacing="0" style="background:#ffffff;border-radius:4px;">
        <tr>
          <td style="padding:16px 24px;border-bottom:1px solid #e3e6ea;">
            <img src="cid:{logo}" alt="Procurement Service" height="32">
          </td>
        </tr>
        <tr>
          <td style="padding:24px;color:#20232a;font-size:14px;line-height:1.5;">
{body}
          </td>
        </tr>
        <tr>
          <td style="padding:16px 24px;border-top:1px solid #e3e6ea;color:#8b919a;font-size:12px;">
            This message was sent automatically by the procurement service. Please do not reply.
          </td>
        </tr>
      </table>
    </td></tr>
  </table>
</body>
</html>"#,
        logo = LOGO_CONTENT_ID,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_between_header_and_footer() {
        let html = wrap_html("<p>Hello</p>");

        assert!(html.contains("<p>Hello</p>"));
        assert!(html.contains("cid:logo"));
        assert!(html.contains("sent automatically"));
        // body sits between the logo header and the footer
        let logo_at = html.find("cid:logo").unwrap();
        let body_at = html.find("<p>Hello</p>").unwrap();
        let footer_at = html.find("sent automatically").unwrap();
        assert!(logo_at < body_at && body_at < footer_at);
    }
}
