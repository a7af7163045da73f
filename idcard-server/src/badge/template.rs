//! Badge HTML template builder
//!
//! Pure mapping from (member, settings, template) to a self-contained
//! HTML document with two card-sized pages: the badge front and back.
//! Identical inputs always produce byte-identical output; nothing here
//! reads the clock or any other ambient state.

use super::assets::AssetResolver;
use crate::db::models::{CardLayout, CardTemplate, Member, OrgSettings};
use crate::utils::format_badge_date;

/// Physical card size (CR80 portrait)
pub const CARD_WIDTH_IN: f64 = 2.125;
pub const CARD_HEIGHT_IN: f64 = 3.375;

/// Rendered in place of missing optional text
const TEXT_PLACEHOLDER: &str = "\u{2014}";

/// Substituted with the member's badge code in the QR pattern
const QR_MEMBER_ID_TOKEN: &str = "{memberId}";

/// Build the full badge document for one member.
///
/// Image references are inlined by `resolver`; unresolvable images fall
/// back to neutral placeholder blocks so rendering never depends on
/// external fetches.
pub fn build_badge_html(
    member: &Member,
    settings: &OrgSettings,
    template: &CardTemplate,
    resolver: &AssetResolver,
) -> String {
    let primary = &template.color_scheme.primary;
    let accent = &template.color_scheme.accent;
    let font = &template.font_family;
    let density = match template.layout {
        CardLayout::Classic => "10px",
        CardLayout::Modern => "11px",
        CardLayout::Compact => "9px",
    };

    let photo = image_or_placeholder(
        member.photo_url.as_deref().and_then(|r| resolver.resolve(r)),
        "photo",
        "PHOTO",
    );
    let logo = image_or_placeholder(
        settings.logo_url.as_deref().and_then(|r| resolver.resolve(r)),
        "logo",
        "LOGO",
    );
    let signature = image_or_placeholder(
        settings
            .signature_url
            .as_deref()
            .and_then(|r| resolver.resolve(r)),
        "signature",
        "",
    );

    let verify_url = settings
        .qr_url_pattern
        .replace(QR_MEMBER_ID_TOKEN, &member.member_id);
    let status = if member.is_active { "VALID" } else { "SUSPENDED" };
    let status_class = if member.is_active { "valid" } else { "suspended" };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  @page {{ size: {CARD_WIDTH_IN}in {CARD_HEIGHT_IN}in; margin: 0; }}
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  html, body {{ font-family: {font}; color-scheme: light only; background: #ffffff; }}
  .page {{
    width: {CARD_WIDTH_IN}in; height: {CARD_HEIGHT_IN}in;
    page-break-after: always; overflow: hidden;
    display: flex; flex-direction: column; align-items: center;
    font-size: {density}; background: #ffffff;
  }}
  .band {{ width: 100%; background: {primary}; color: #ffffff; text-align: center; padding: 6px 4px; }}
  .band .org {{ font-size: 1.1em; font-weight: bold; text-transform: uppercase; }}
  .photo, .logo {{ object-fit: cover; border: 2px solid {accent}; border-radius: 4px; }}
  .photo {{ width: 0.9in; height: 1.1in; margin-top: 8px; }}
  .logo {{ width: 0.5in; height: 0.5in; border: none; margin-top: 4px; }}
  .ph {{ display: flex; align-items: center; justify-content: center;
        background: #e8e8e8; color: #9a9a9a; font-size: 8px; letter-spacing: 1px; }}
  .name {{ font-size: 1.3em; font-weight: bold; color: {primary}; margin-top: 6px; text-align: center; }}
  .designation {{ color: {accent}; text-transform: capitalize; margin-top: 2px; }}
  .code {{ font-family: monospace; margin-top: 4px; letter-spacing: 1px; }}
  .status {{ margin-top: 4px; font-weight: bold; padding: 1px 8px; border-radius: 8px; }}
  .status.valid {{ background: #e6f4ea; color: #137333; }}
  .status.suspended {{ background: #fce8e6; color: #c5221f; }}
  .rows {{ width: 100%; padding: 8px 10px; }}
  .rows .row {{ display: flex; justify-content: space-between; border-bottom: 1px solid #eeeeee; padding: 3px 0; }}
  .rows .label {{ color: #666666; }}
  .signature {{ width: 0.8in; height: 0.35in; object-fit: contain; margin-top: auto; }}
  .sig-caption {{ border-top: 1px solid {primary}; font-size: 8px; padding: 2px 10px; margin-bottom: 6px; }}
  .verify {{ width: 90%; border: 1px dashed {accent}; font-size: 7px; word-break: break-all;
            text-align: center; padding: 4px; margin-top: 6px; }}
  .footer {{ font-size: 7px; color: #666666; margin-top: 4px; margin-bottom: 4px; text-align: center; }}
</style>
</head>
<body>
  <div class="page">
    <div class="band">
      <div class="org">{org_name}</div>
    </div>
    {logo}
    {photo}
    <div class="name">{full_name}</div>
    <div class="designation">{designation}</div>
    <div class="code">{member_code}</div>
    <div class="status {status_class}">{status}</div>
  </div>
  <div class="page">
    <div class="band"><div class="org">Member Details</div></div>
    <div class="rows">
      <div class="row"><span class="label">Joined</span><span>{joined}</span></div>
      <div class="row"><span class="label">Blood group</span><span>{blood_group}</span></div>
      <div class="row"><span class="label">Emergency contact</span><span>{emergency_name}</span></div>
      <div class="row"><span class="label">Emergency phone</span><span>{emergency_phone}</span></div>
      <div class="row"><span class="label">Contact</span><span>{contact}</span></div>
    </div>
    <div class="verify">{verify_url}</div>
    {signature}
    <div class="sig-caption">Authorized signature</div>
    <div class="footer">{org_address}<br>{org_contact}</div>
  </div>
</body>
</html>
"#,
        org_name = escape(or_placeholder(&settings.name)),
        full_name = escape(&member.full_name),
        designation = member.designation,
        member_code = escape(&member.member_id),
        joined = escape(&format_badge_date(&member.joining_date)),
        blood_group = escape(opt_or_placeholder(member.blood_group.as_deref())),
        emergency_name = escape(opt_or_placeholder(member.emergency_contact_name.as_deref())),
        emergency_phone = escape(opt_or_placeholder(
            member.emergency_contact_number.as_deref()
        )),
        contact = escape(&member.contact_number),
        verify_url = escape(&verify_url),
        org_address = escape(or_placeholder(&settings.address)),
        org_contact = escape(opt_or_placeholder(settings.phone.as_deref())),
    )
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        TEXT_PLACEHOLDER
    } else {
        value
    }
}

fn opt_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => TEXT_PLACEHOLDER,
    }
}

fn image_or_placeholder(src: Option<String>, class: &str, caption: &str) -> String {
    match src {
        Some(src) => format!(r#"<img class="{class}" src="{}">"#, escape(&src)),
        None => format!(r#"<div class="{class} ph">{caption}</div>"#),
    }
}

/// Minimal HTML escaping for interpolated text
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CardTemplate, Designation, Member, OrgSettings};

    fn member() -> Member {
        Member {
            id: None,
            member_id: "ORG-2024-001".to_string(),
            full_name: "Jane Doe".to_string(),
            designation: Designation::Volunteer,
            joining_date: "2024-01-15".to_string(),
            contact_number: "+15551234567".to_string(),
            blood_group: None,
            emergency_contact_name: None,
            emergency_contact_number: None,
            photo_url: None,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn settings() -> OrgSettings {
        OrgSettings {
            name: "Helping Hands".to_string(),
            ..Default::default()
        }
    }

    fn resolver() -> AssetResolver {
        AssetResolver::new("/nonexistent")
    }

    #[test]
    fn identical_inputs_yield_identical_html() {
        let (m, s, t, r) = (member(), settings(), CardTemplate::default(), resolver());
        let a = build_badge_html(&m, &s, &t, &r);
        let b = build_badge_html(&m, &s, &t, &r);
        assert_eq!(a, b);
    }

    #[test]
    fn has_two_pages_and_card_sizing() {
        let html = build_badge_html(&member(), &settings(), &CardTemplate::default(), &resolver());
        assert_eq!(html.matches(r#"class="page""#).count(), 2);
        assert!(html.contains("size: 2.125in 3.375in"));
    }

    #[test]
    fn missing_images_render_placeholders() {
        let html = build_badge_html(&member(), &settings(), &CardTemplate::default(), &resolver());
        assert!(html.contains(r#"<div class="photo ph">PHOTO</div>"#));
        assert!(html.contains(r#"<div class="logo ph">LOGO</div>"#));
        assert!(!html.contains("data:image"));
    }

    #[test]
    fn missing_optional_text_renders_dash() {
        let html = build_badge_html(&member(), &settings(), &CardTemplate::default(), &resolver());
        assert!(html.contains("\u{2014}"));
    }

    #[test]
    fn local_photo_is_inlined() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("uploads")).unwrap();
        std::fs::write(dir.path().join("uploads/me.jpg"), b"fakejpeg").unwrap();

        let mut m = member();
        m.photo_url = Some("/uploads/me.jpg".to_string());
        let html = build_badge_html(
            &m,
            &settings(),
            &CardTemplate::default(),
            &AssetResolver::new(dir.path()),
        );
        assert!(html.contains("data:image/jpeg;base64,"));
    }

    #[test]
    fn remote_logo_passes_through() {
        let mut s = settings();
        s.logo_url = Some("https://cdn.example.org/logo.png".to_string());
        let html = build_badge_html(&member(), &s, &CardTemplate::default(), &resolver());
        assert!(html.contains(r#"src="https://cdn.example.org/logo.png""#));
    }

    #[test]
    fn qr_pattern_substitutes_member_id() {
        let html = build_badge_html(&member(), &settings(), &CardTemplate::default(), &resolver());
        assert!(html.contains("https://example.org/verify/ORG-2024-001"));
    }

    #[test]
    fn inactive_member_shows_suspended() {
        let mut m = member();
        m.is_active = false;
        let html = build_badge_html(&m, &settings(), &CardTemplate::default(), &resolver());
        assert!(html.contains("SUSPENDED"));
    }

    #[test]
    fn dates_are_day_month_year() {
        let html = build_badge_html(&member(), &settings(), &CardTemplate::default(), &resolver());
        assert!(html.contains("15/01/2024"));
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let mut m = member();
        m.full_name = "<script>alert(1)</script>".to_string();
        let html = build_badge_html(&m, &settings(), &CardTemplate::default(), &resolver());
        assert!(!html.contains("<script>"));
    }
}
