//! Built-in recipes for the socket client classes under `lib/socket`.

use crate::patch::{ConditionalRule, MarkerRule, PatchError};
use crate::utils::dir_scan::FileFilter;
use crate::utils::recipe::{Recipe, Rule};

pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Recipe,
}

impl Preset {
    pub fn recipe(&self) -> Recipe {
        (self.build)()
    }
}

const SOCKET_URL_BLOCK: &str = r#"  private getSocketUrl(): string {
    if (typeof window === "undefined") return "";
    const envUrl = process.env.NEXT_PUBLIC_SOCKET_URL;
    const apiUrl = process.env.NEXT_PUBLIC_API_URL || "https://api.edulearning.io.vn/api";
    let socketUrl = envUrl || apiUrl;
    try {
      if (typeof socketUrl === "string" && socketUrl.includes("//") && !socketUrl.includes("://")) {
        socketUrl = socketUrl.replace("//", "://");
      }
      const url = new URL(socketUrl.includes("://") ? socketUrl : `https://${socketUrl}`);
      console.warn(`[Socket] Connecting to origin: ${url.origin}`);
      return url.origin;
    } catch (e) {
      return socketUrl.split("/api")[0];
    }
  }"#;

const TOKEN_LOGIC_BLOCK: &str = r#"  private getToken(): string | null {
    if (typeof window === "undefined") return null;
    try {
      const { getCookie } = require("@/lib/utils/cookies");
      const token = getCookie("_at") || getCookie("access_token") || getCookie("token");
      if (token) return token;
      return localStorage.getItem("token") || localStorage.getItem("access_token");
    } catch (e) {
      return null;
    }
  }"#;

fn socket_url() -> Recipe {
    Recipe {
        directory: None,
        filter: FileFilter::default(),
        rule: Rule::Marker(MarkerRule::new(
            "private getSocketUrl(): string {",
            SOCKET_URL_BLOCK,
        )),
    }
}

fn token_logic() -> Recipe {
    Recipe {
        directory: None,
        filter: FileFilter::default().excluding("types.ts"),
        rule: Rule::Conditional(ConditionalRule {
            signature: "getToken(): string | null".to_string(),
            anchors: vec!["connect():".to_string(), "connect() {".to_string()],
            pattern: r"private getToken\(\): string \| null \{.*?\}".to_string(),
            replacement: TOKEN_LOGIC_BLOCK.to_string(),
            label: Some("token logic".to_string()),
        }),
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "socket-url",
        description: "Replace getSocketUrl() with the origin resolver",
        build: socket_url,
    },
    Preset {
        name: "token-logic",
        description: "Insert or replace getToken() with the cookie/localStorage lookup",
        build: token_logic,
    },
];

pub fn find(name: &str) -> Result<&'static Preset, PatchError> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| PatchError::UnknownPreset(name.to_string()))
}
