use crate::model::Project;
use crate::{PhotobookError, Result};

/// Counts shown by `pbk info` and the editor status line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStatistics {
    pub pages: usize,
    pub slots: usize,
    /// Slots with a photo assigned
    pub filled: usize,
    pub empty: usize,
    pub texts: usize,
    /// Filled slots carrying non-default properties
    pub customized: usize,
}

/// Calculate statistics for the project
pub fn calculate_statistics(project: &Project) -> Result<ProjectStatistics> {
    if project.pages.is_empty() {
        return Err(PhotobookError::InvalidInput(
            "The project has no pages".to_string(),
        ));
    }

    let mut stats = ProjectStatistics {
        pages: project.page_count(),
        ..ProjectStatistics::default()
    };

    for page in &project.pages {
        stats.slots += page.photos.len();
        stats.texts += page.texts.len();
        for slot in &page.photos {
            if slot.is_empty() {
                stats.empty += 1;
            } else {
                stats.filled += 1;
                if slot.properties.is_some() {
                    stats.customized += 1;
                }
            }
        }
    }

    Ok(stats)
}
