/// Feedback on a Zeus in Training, as submitted through the feedback form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZitFeedback {
    /// Member the feedback is about.
    pub subject_id: u64,
    /// Operation name and date, free text.
    pub operation: String,
    /// What the operation involved.
    pub details: String,
    pub done_well: String,
    pub improvements: String,
    /// Whether the author recommends full Zeus tags.
    pub recommend: bool,
}
