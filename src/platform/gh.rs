//! GitHub platform service backed by the `gh` CLI

use crate::error::Result;
use crate::platform::PlatformService;
use crate::tool::Tool;
use crate::types::{PrState, PullRequest};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Fields requested from `gh pr list` / `gh pr view`
const PR_FIELDS: &str = "baseRefName,body,headRefName,isDraft,number,title,url,mergeCommit,state";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoView {
    default_branch_ref: BranchRef,
}

#[derive(Deserialize)]
struct BranchRef {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPullRequest {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    base_ref_name: String,
    head_ref_name: String,
    #[serde(default)]
    is_draft: bool,
    url: String,
    state: PrState,
    merge_commit: Option<GhCommit>,
}

#[derive(Deserialize)]
struct GhCommit {
    oid: String,
}

impl From<GhPullRequest> for PullRequest {
    fn from(pr: GhPullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            body: pr.body,
            base_ref: pr.base_ref_name,
            head_ref: pr.head_ref_name,
            is_draft: pr.is_draft,
            state: pr.state,
            html_url: pr.url,
            merge_commit: pr.merge_commit.map(|c| c.oid).filter(|oid| !oid.is_empty()),
        }
    }
}

/// GitHub service using the `gh` CLI
pub struct GhCliService {
    gh: Tool,
}

impl GhCliService {
    /// Create a service around a located `gh` binary
    ///
    /// Prompts, update notices and forced colors are disabled so stdout is
    /// plain JSON and stderr only carries real diagnostics. `gh pr checkout`
    /// runs git in a background process group, where a credential prompt on
    /// the terminal would stop the process.
    pub fn new(gh: Tool) -> Self {
        let gh = gh
            .with_env("GH_PROMPT_DISABLED", "1")
            .with_env("GIT_TERMINAL_PROMPT", "0")
            .with_env("GH_NO_UPDATE_NOTIFIER", "1")
            .with_env("CLICOLOR_FORCE", "0");
        Self { gh }
    }
}

#[async_trait]
impl PlatformService for GhCliService {
    async fn default_branch(&self) -> Result<String> {
        let stdout = self
            .gh
            .run_strict(&["repo", "view", "--json", "defaultBranchRef"])
            .await?;
        let view: RepoView = serde_json::from_str(&stdout)?;
        debug!(branch = %view.default_branch_ref.name, "resolved default branch");
        Ok(view.default_branch_ref.name)
    }

    async fn list_open_prs(&self, author: &str) -> Result<Vec<PullRequest>> {
        debug!(author, "listing open PRs");
        let stdout = self
            .gh
            .run_strict(&[
                "pr", "list", "--author", author, "--state", "open", "--json", PR_FIELDS,
            ])
            .await?;
        let prs: Vec<GhPullRequest> = serde_json::from_str(&stdout)?;
        debug!(count = prs.len(), "listed open PRs");
        Ok(prs.into_iter().map(PullRequest::from).collect())
    }

    async fn get_pr(&self, number: u64) -> Result<PullRequest> {
        debug!(pr_number = number, "getting PR");
        let number_arg = number.to_string();
        let stdout = self
            .gh
            .run_strict(&["pr", "view", &number_arg, "--json", PR_FIELDS])
            .await?;
        let pr: PullRequest = serde_json::from_str::<GhPullRequest>(&stdout)?.into();
        debug!(pr_number = number, state = %pr.state, "got PR");
        Ok(pr)
    }

    async fn checkout_pr(&self, number: u64) -> Result<()> {
        debug!(pr_number = number, "checking out PR");
        let number_arg = number.to_string();
        // git reports branch switches on stderr, so only the exit status counts here
        self.gh.run_detached(&["pr", "checkout", &number_arg]).await?;
        Ok(())
    }
}
