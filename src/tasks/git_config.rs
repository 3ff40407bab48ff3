use anyhow::Result;

use super::helpers::require_tool;
use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::git_config::GitConfigEntry;

/// Write the configured global git identity and defaults.
#[derive(Debug)]
pub struct ConfigureGit;

impl Task for ConfigureGit {
    fn name(&self) -> &'static str {
        "Configure git"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let settings = ctx.config.git.settings();
        if settings.is_empty() {
            return Ok(TaskResult::Skipped("no git settings configured".to_string()));
        }
        require_tool(ctx, "git", "install the Xcode command line tools")?;

        let entries = settings
            .into_iter()
            .map(|(key, value)| GitConfigEntry::new(key, value, &*ctx.executor));
        let stats = process_resources(ctx, entries, &ProcessOpts::apply_all("set"))?;
        Ok(stats.finish(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::resources::test_helpers::RecordingExecutor;
    use crate::tasks::test_helpers::make_context_with;

    fn git(content: &str) -> Config {
        toml::from_str(&format!("[git]\n{content}")).unwrap()
    }

    #[test]
    fn only_differing_values_are_written() {
        let (ctx, _, exec) = make_context_with(
            git("user_name = \"Ada\"\nuser_email = \"ada@example.com\"\n"),
            RecordingExecutor::new()
                .with_which("git")
                .output("git config --global --get user.name", "Ada\n")
                .failing("git config --global --get user.email"),
        );
        ConfigureGit.run(&ctx).unwrap();
        assert_eq!(
            exec.calls_except(&["git config --global --get"]),
            vec!["git config --global user.email ada@example.com"]
        );
    }

    #[test]
    fn absent_keys_issue_no_commands() {
        let (ctx, _, exec) =
            make_context_with(Config::default(), RecordingExecutor::new().with_which("git"));
        assert!(matches!(
            ConfigureGit.run(&ctx).unwrap(),
            TaskResult::Skipped(_)
        ));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn write_failure_fails_the_step() {
        let (ctx, _, _) = make_context_with(
            git("default_branch = \"main\"\n"),
            RecordingExecutor::new()
                .with_which("git")
                .failing("git config --global"),
        );
        assert!(ConfigureGit.run(&ctx).is_err());
    }
}
