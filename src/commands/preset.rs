use std::path::Path;

use crate::commands::{Status, recipe_run};
use crate::patch::{PatchError, presets};

/// Run the built-in preset `name` against `dir`.
pub fn run<F>(name: &str, dir: &Path, on_status: Option<F>) -> Result<Vec<Status>, PatchError>
where
    F: FnMut(&Status),
{
    let recipe = presets::find(name)?.recipe();
    recipe_run::apply(&recipe, Some(dir), on_status)
}

/// Recipe JSON for the preset `name`.
pub fn show(name: &str) -> Result<String, PatchError> {
    presets::find(name)?
        .recipe()
        .to_json()
        .map_err(|e| PatchError::RecipeError { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::recipe::Recipe;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn token_logic_skips_types_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("chat.ts"), "class A {\n  connect(): void {}\n}\n").unwrap();
        fs::write(dir.path().join("types.ts"), "connect(): void;\n").unwrap();

        let statuses = run("token-logic", dir.path(), None::<fn(&Status)>).unwrap();

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].file(), "chat.ts");
        assert_eq!(
            fs::read_to_string(dir.path().join("types.ts")).unwrap(),
            "connect(): void;\n"
        );
    }

    #[test]
    fn socket_url_reports_fixed_files() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("chat.ts"),
            "class A {\n  private getSocketUrl(): string {\n    return \"\";\n  }\n}\n",
        )
        .unwrap();

        let mut lines = Vec::new();
        run("socket-url", dir.path(), Some(|s: &Status| lines.push(s.to_string()))).unwrap();

        assert_eq!(lines, vec!["✅ Fixed chat.ts"]);
    }

    #[test]
    fn token_logic_status_names_the_method() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("chat.ts"), "class A {\n  connect(): void {}\n}\n").unwrap();

        let mut lines = Vec::new();
        run("token-logic", dir.path(), Some(|s: &Status| lines.push(s.to_string()))).unwrap();

        assert_eq!(lines, vec!["✅ Updated token logic in chat.ts"]);
    }

    #[test]
    fn unknown_preset_errors() {
        let dir = tempdir().unwrap();

        let result = run("nope", dir.path(), None::<fn(&Status)>);

        assert_eq!(result, Err(PatchError::UnknownPreset("nope".to_string())));
    }

    #[test]
    fn shown_json_parses_as_recipe() {
        let json = show("token-logic").unwrap();

        let recipe: Recipe = serde_json::from_str(&json).unwrap();

        assert_eq!(recipe.filter.exclude, vec!["types.ts"]);
    }
}
