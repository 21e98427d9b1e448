use super::record::CanvasRecord;

/// Equality filter over the filterable record fields.
///
/// `/get_log` uses canvas/user/alignment and `/get_canvas_history` uses
/// user/campaign/canvas; both share this type and AND-combine whatever is
/// set. Absent fields impose no restriction.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub canvas: Option<String>,
    pub user: Option<String>,
    pub campaign: Option<String>,
    pub alignment: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.canvas.is_none()
            && self.user.is_none()
            && self.campaign.is_none()
            && self.alignment.is_none()
    }

    pub fn matches(&self, record: &CanvasRecord) -> bool {
        if let Some(canvas) = &self.canvas {
            if record.canvas != *canvas {
                return false;
            }
        }
        if let Some(user) = &self.user {
            if record.user != *user {
                return false;
            }
        }
        if let Some(campaign) = &self.campaign {
            if record.campaign != *campaign {
                return false;
            }
        }
        if let Some(alignment) = &self.alignment {
            if record.meta.alignment != *alignment {
                return false;
            }
        }
        true
    }
}

/// Query parameters arrive as `Option<String>` where an empty string means
/// "no filter" (e.g. `?user=`), matching the original API.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Most recent first, by the lexicographic timestamp contract. The sort is
/// stable, so same-timestamp records keep their store order.
pub fn sort_newest_first(records: &mut [CanvasRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
