use std::path::Path;
use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::RosterCoordinator;
use crate::types::internal::context::RequestContext;

/// Write the roster CSV to `output`, or to stdout when no path is given
pub async fn export_csv(
    app_data: Arc<AppData>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("export-csv");
    let csv = RosterCoordinator::new(app_data).export(&ctx).await?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", csv))?;
            println!("Roster written to {}", path.display());
        }
        None => println!("{}", csv),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{seed_user, setup_test_app_data};
    use crate::types::Role;

    #[tokio::test]
    async fn test_export_writes_file() {
        let app_data = setup_test_app_data().await;
        seed_user(&app_data, "admin", Role::Admin, None).await;

        let path = std::env::temp_dir().join(format!("roster-{}.csv", uuid::Uuid::new_v4()));
        export_csv(app_data, Some(&path)).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("username,password,contactNumber,liveMode,role"));
        assert!(lines.next().unwrap().starts_with("admin,"));
    }
}
