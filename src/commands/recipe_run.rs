use std::path::Path;

use crate::commands::{Status, conditional_apply, marker_apply};
use crate::patch::{ConditionalPatcher, PatchError};
use crate::utils::recipe::{Recipe, Rule};

/// Load a recipe file and run it.
pub fn run<F>(
    recipe_path: &Path,
    dir: Option<&Path>,
    on_status: Option<F>,
) -> Result<Vec<Status>, PatchError>
where
    F: FnMut(&Status),
{
    let recipe = Recipe::load(recipe_path).map_err(|e| PatchError::RecipeError {
        reason: format!("{}: {}", recipe_path.display(), e),
    })?;
    apply(&recipe, dir, on_status)
}

/// Run `recipe` against `dir`, or against the recipe's own directory when
/// `dir` is `None`.
pub fn apply<F>(
    recipe: &Recipe,
    dir: Option<&Path>,
    on_status: Option<F>,
) -> Result<Vec<Status>, PatchError>
where
    F: FnMut(&Status),
{
    let dir = dir
        .or(recipe.directory.as_deref())
        .ok_or_else(|| PatchError::RecipeError {
            reason: "no target directory given".to_string(),
        })?;

    match &recipe.rule {
        Rule::Marker(rule) => marker_apply::run(dir, &recipe.filter, rule, on_status),
        Rule::Conditional(rule) => {
            let patcher = ConditionalPatcher::new(rule.clone())?;
            conditional_apply::run(dir, &recipe.filter, &patcher, on_status)
        }
    }
}
