//! Command handlers for the `opsdesk` binary.
//!
//! The list commands drive the same [`ListController`] the interactive
//! views use: tab and search flags become controller calls, and the
//! printed counts come from the loaded page.

use std::sync::Arc;

use anyhow::bail;

use opsdesk_client::models::change_request::ChangeRequest;
use opsdesk_client::models::incident::Incident;
use opsdesk_client::models::user::User;
use opsdesk_core::{department, now_ms};
use opsdesk_views::{
    ChangeRequestFetcher, IncidentFetcher, ListController, ListEntity, LoadOutcome, UserFetcher,
};

use crate::app::App;
use crate::args::ListOptions;

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

pub async fn login(app: &App, email: &str, password: &str) -> anyhow::Result<()> {
    let user = app.client.auth().login(email, password).await?;
    println!(
        "Signed in as {} <{}> ({})",
        user.name,
        user.email,
        user.role.display_name()
    );
    Ok(())
}

pub fn logout(app: &App) -> anyhow::Result<()> {
    app.client.auth().logout()?;
    println!("Signed out.");
    Ok(())
}

pub fn whoami(app: &App) -> anyhow::Result<()> {
    let summary = app.session.summary();
    if !summary.authenticated {
        println!("Not signed in.");
        if let Some(remaining) = &summary.remaining {
            println!("Stored token: {remaining}");
        }
        return Ok(());
    }

    println!("User:       {}", summary.user_email.as_deref().unwrap_or("-"));
    println!("Admin:      {}", if summary.admin { "yes" } else { "no" });
    println!("Supervisor: {}", if summary.supervisor { "yes" } else { "no" });
    if let Some(token) = &summary.masked_token {
        println!("Token:      {token}");
    }
    if let Some(remaining) = &summary.remaining {
        println!("Expires:    {remaining}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// List commands
// ---------------------------------------------------------------------------

pub async fn incidents(app: &App, options: &ListOptions) -> anyhow::Result<()> {
    let fetcher = Arc::new(IncidentFetcher::new(app.client.clone()));
    let controller = ListController::new(fetcher, app.store.clone())?;
    run_list(controller, options, |incident: &Incident| {
        format!(
            "{:<10} {:<13} {:<8} {}",
            incident.number,
            incident.status.display_name(),
            incident.severity.display_name(),
            incident.title
        )
    })
    .await
}

pub async fn change_requests(app: &App, options: &ListOptions) -> anyhow::Result<()> {
    let fetcher = Arc::new(ChangeRequestFetcher::new(app.client.clone()));
    let controller = ListController::new(fetcher, app.store.clone())?;
    run_list(controller, options, |request: &ChangeRequest| {
        format!(
            "{:<10} {:<11} {:<18} {}",
            request.number,
            request.status.display_name(),
            department::display_name(&request.assigned_department),
            request.title
        )
    })
    .await
}

pub async fn users(app: &App, options: &ListOptions) -> anyhow::Result<()> {
    let fetcher = Arc::new(UserFetcher::new(app.client.clone()));
    let controller = ListController::new(fetcher, app.store.clone())?;
    run_list(controller, options, |user: &User| {
        format!(
            "{:<24} {:<28} {:<13} {:<18} {}",
            user.name,
            user.email,
            user.role.display_name(),
            department::display_name(&user.primary_department),
            if user.active { "active" } else { "inactive" }
        )
    })
    .await
}

/// Apply the flags to a fresh controller, load, and print the page.
///
/// Each flag maps to the controller call the corresponding view control
/// would make, so a `--tab` plus `--search` invocation issues the same
/// request sequence as clicking the tab and then typing.
async fn run_list<E, F>(
    mut controller: ListController<E>,
    options: &ListOptions,
    row: F,
) -> anyhow::Result<()>
where
    E: ListEntity,
    F: Fn(&E) -> String,
{
    if let Some(tab) = &options.tab {
        if controller.set_active_tab(tab).await? == LoadOutcome::Skipped {
            let known: Vec<&str> = E::tabs().iter().map(|t| t.id).collect();
            bail!("unknown tab '{tab}' (expected one of: {})", known.join(", "));
        }
    } else {
        controller.reload().await;
    }

    if let Some(term) = &options.search {
        controller.set_search_term(term).await;
    }

    if let Some(page) = options.page {
        if controller.go_to_page(page).await == LoadOutcome::Skipped {
            bail!(
                "page {page} is out of range (have {} page(s))",
                controller.total_pages()
            );
        }
    }

    if let Some(notice) = controller.notice(now_ms()) {
        bail!("{}", notice.message);
    }

    for entity in controller.displayed() {
        println!("{}", row(entity));
    }

    let counts: Vec<String> = E::tabs()
        .iter()
        .map(|tab| format!("{}: {}", tab.label, controller.status_count(tab.id)))
        .collect();
    println!();
    println!("{}", counts.join("  "));
    println!(
        "Page {} of {} ({} total)",
        controller.current_page() + 1,
        controller.total_pages().max(1),
        controller.total_elements()
    );
    Ok(())
}
