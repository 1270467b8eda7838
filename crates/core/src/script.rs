//! Self-contained in-page deploy script, for pasting into any evaluator
//! attached to the designer tab when driving the session by hand.

use crate::config::{DeployConfig, SiteConfig};
use crate::extract::HeadMarker;
use crate::inject::{InjectionScope, SurfaceLayout};
use crate::slug::PageSlug;

/// Renders `text` as a JS string literal. JSON string syntax is a subset
/// of JS, so encoding through a JSON value is enough.
pub(crate) fn js_string(text: &str) -> String {
	serde_json::Value::String(text.to_string()).to_string()
}

/// JS source of the head rule, kept in lockstep with [`crate::extract`].
fn head_pattern(marker: HeadMarker) -> &'static str {
	match marker {
		HeadMarker::RobotsMeta => r#"/<meta name="robots"[^>]*>[\s\S]*?<\/style>/"#,
		HeadMarker::FontPreload => r#"/<link rel="preload"[^>]*>[\s\S]*?<\/style>/"#,
	}
}

const BODY_PATTERN: &str = r#"/<body[^>]*>([\s\S]*)<\/body>/"#;

/// Renders one JS expression that runs the whole pipeline inside the
/// page and resolves to a status string, mirroring the driven pipeline's
/// rules, slot order and status codes.
pub fn inline_deploy_script(site: &SiteConfig, config: &DeployConfig, slug: &PageSlug) -> String {
	let url = site.page_url(slug);
	let selector = js_string(&config.editor_selector);
	let required = config.layout.required_slots();
	let (schema_slot, head_slot, body_slot) = match config.layout {
		SurfaceLayout::ThreeField => (Some(0usize), 1usize, 2usize),
		SurfaceLayout::TwoField => (None, 0, 1),
	};
	let need_head = matches!(config.scope, InjectionScope::Full | InjectionScope::HeadOnly);
	let need_body = matches!(config.scope, InjectionScope::Full | InjectionScope::BodyOnly);

	let mut lines: Vec<String> = Vec::new();
	lines.push("(async () => {".to_string());
	lines.push("  try {".to_string());
	lines.push(format!("    const res = await fetch('{url}');"));
	lines.push("    if (!res.ok) return 'FETCH_ERROR: HTTP ' + res.status;".to_string());
	lines.push("    const html = await res.text();".to_string());
	if need_head {
		lines.push(format!("    const head = html.match({});", head_pattern(config.marker)));
	}
	if need_body {
		lines.push(format!("    const body = html.match({BODY_PATTERN});"));
	}
	match (need_head, need_body) {
		(true, true) => lines.push("    if (!head || !body) return 'EXTRACT_ERROR: head=' + !!head + ' body=' + !!body;".to_string()),
		(true, false) => lines.push("    if (!head) return 'EXTRACT_ERROR: head=false';".to_string()),
		(false, true) => lines.push("    if (!body) return 'EXTRACT_ERROR: body=false';".to_string()),
		(false, false) => {}
	}
	lines.push(format!("    const eds = document.querySelectorAll({selector});"));
	lines.push(format!("    if (eds.length < {required}) return 'SURFACE_ERROR: found ' + eds.length + ' editors (need {required})';"));
	if need_head {
		if let Some(slot) = schema_slot {
			lines.push(format!("    eds[{slot}].CodeMirror.setValue('');"));
		}
		lines.push(format!("    eds[{head_slot}].CodeMirror.setValue(head[0]);"));
	}
	if need_body {
		lines.push(format!("    eds[{body_slot}].CodeMirror.setValue(body[1].trim());"));
	}
	let status = match (need_head, need_body) {
		(true, true) => "    return 'OK: head=' + head[0].length + ' body=' + body[1].trim().length;",
		(true, false) => "    return 'OK: head=' + head[0].length;",
		(false, true) => "    return 'OK: body=' + body[1].trim().length;",
		(false, false) => "    return 'OK';",
	};
	lines.push(status.to_string());
	lines.push("  } catch (e) {".to_string());
	lines.push("    return 'REMOTE_ERROR: ' + e.message;".to_string());
	lines.push("  }".to_string());
	lines.push("})()".to_string());
	lines.join("\n")
}
