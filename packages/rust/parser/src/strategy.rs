//! Template strategies and the factory that selects them.
//!
//! The three templates share one driver (see [`ResumeParser`]) and differ in two
//! hooks: [`Strategy::begin_new_item`] runs on a role header and
//! [`Strategy::handle_line`] attaches body lines and plain sub-headers.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use resumemd_shared::{
    ExperienceContent, ParseOptions, ProjectContent, ProjectEntry, ResumeError, ResumeRecord,
    Result,
};

use crate::driver::{ParseState, ResumeParser};
use crate::header::parse_header;

/// Parsing policy for one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `project_based_paras`: projects under a role, one paragraph each.
    ProjectParas,
    /// `project_based_bullets`: projects under a role, bullet lines each.
    ProjectBullets,
    /// `multiple_roles_bullets`: several roles per file, bullet lines directly under each.
    MultipleRoles,
}

impl Strategy {
    /// Every strategy, in registration order.
    pub const ALL: [Strategy; 3] = [
        Strategy::ProjectParas,
        Strategy::ProjectBullets,
        Strategy::MultipleRoles,
    ];

    /// Template name as written in `# template: <name>`.
    pub fn template(self) -> &'static str {
        match self {
            Self::ProjectParas => "project_based_paras",
            Self::ProjectBullets => "project_based_bullets",
            Self::MultipleRoles => "multiple_roles_bullets",
        }
    }

    /// Content container a fresh record starts with.
    pub(crate) fn empty_content(self) -> ExperienceContent {
        match self {
            Self::ProjectParas | Self::ProjectBullets => ExperienceContent::Projects(Vec::new()),
            Self::MultipleRoles => ExperienceContent::Bullets(Vec::new()),
        }
    }

    /// Whether the open record is flushed when a new role header arrives.
    pub(crate) fn flushes_on_new_item(self, options: &ParseOptions) -> bool {
        match self {
            Self::MultipleRoles => true,
            Self::ProjectParas | Self::ProjectBullets => options.flush_on_new_item,
        }
    }

    /// Handle a role header: optionally flush the open record, then start a new
    /// one titled from the header's `title:` field.
    pub(crate) fn begin_new_item(
        self,
        mut state: ParseState,
        line: &str,
        company: &str,
        options: &ParseOptions,
    ) -> ParseState {
        let mut record = ResumeRecord::new(company, self.empty_content());
        if let Some(field) = parse_header(line).filter(|f| f.key == "title") {
            record.title = field.value;
        }

        let previous = std::mem::replace(&mut state.record, record);
        if self.flushes_on_new_item(options) && previous.has_title() {
            debug!(title = %previous.title, "flushing record");
            state.output.push(previous);
        }
        state.current_key = None;
        state
    }

    /// Attach a body line (`is_sub_header == false`) or a plain sub-header line
    /// to the open record.
    ///
    /// The content shape was fixed by [`Strategy::empty_content`], so it alone
    /// decides where the line goes.
    pub(crate) fn handle_line(
        self,
        mut state: ParseState,
        line: &str,
        is_sub_header: bool,
    ) -> ParseState {
        match &mut state.record.experience_content {
            ExperienceContent::Projects(projects) if is_sub_header => {
                projects.push(self.new_project(line));
            }
            ExperienceContent::Projects(projects) => {
                if let Some(project) = projects.last_mut() {
                    append_to_project(project, line);
                }
            }
            // Role-level bullets have no nested items, so plain sub-headers are dropped.
            ExperienceContent::Bullets(_) if is_sub_header => {}
            ExperienceContent::Bullets(items) => items.push(line.trim().to_string()),
        }
        state
    }

    /// Fresh project entry titled from a plain sub-header.
    fn new_project(self, line: &str) -> ProjectEntry {
        let experience_content = match self {
            Self::ProjectParas => ProjectContent::Paragraph(String::new()),
            Self::ProjectBullets | Self::MultipleRoles => ProjectContent::Bullets(Vec::new()),
        };
        ProjectEntry {
            project_title: project_title(line),
            experience_content,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

impl FromStr for Strategy {
    type Err = ResumeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.template() == s)
            .ok_or_else(|| ResumeError::unknown_template(s))
    }
}

fn append_to_project(project: &mut ProjectEntry, line: &str) {
    let line = line.trim().to_string();
    match &mut project.experience_content {
        // Paragraph templates keep only the latest line.
        ProjectContent::Paragraph(text) => *text = line,
        ProjectContent::Bullets(items) => items.push(line),
    }
}

/// Text of a plain sub-header with its `#` run removed.
fn project_title(line: &str) -> String {
    line.trim_start_matches('#').trim().to_string()
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Builds a [`ResumeParser`] for a template name.
#[derive(Debug, Clone, Default)]
pub struct StrategyFactory {
    options: ParseOptions,
}

impl StrategyFactory {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Create a parser for `template`, stamping records with `company`.
    ///
    /// Fails with [`ResumeError::UnknownTemplate`] for unregistered names.
    pub fn get_parser(&self, template: &str, company: &str) -> Result<ResumeParser> {
        let strategy: Strategy = template.parse()?;
        Ok(ResumeParser::with_options(strategy, company, self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_names_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.template().parse::<Strategy>().unwrap(), strategy);
            assert_eq!(strategy.to_string(), strategy.template());
        }
    }

    #[test]
    fn unknown_template_names_the_template() {
        let err = StrategyFactory::default()
            .get_parser("bogus", "Acme")
            .unwrap_err();
        assert!(matches!(err, ResumeError::UnknownTemplate { ref template } if template == "bogus"));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn factory_injects_company_and_options() {
        let factory = StrategyFactory::new(ParseOptions {
            flush_on_new_item: false,
        });
        let parser = factory.get_parser("project_based_bullets", "Galileo").unwrap();
        assert_eq!(parser.strategy(), Strategy::ProjectBullets);
        assert_eq!(parser.company(), "Galileo");
        assert!(!parser.options().flush_on_new_item);
    }

    #[test]
    fn flush_policy_per_strategy() {
        let legacy = ParseOptions {
            flush_on_new_item: false,
        };
        assert!(Strategy::MultipleRoles.flushes_on_new_item(&legacy));
        assert!(!Strategy::ProjectParas.flushes_on_new_item(&legacy));
        assert!(!Strategy::ProjectBullets.flushes_on_new_item(&legacy));
        assert!(Strategy::ProjectParas.flushes_on_new_item(&ParseOptions::default()));
    }

    #[test]
    fn project_title_strips_heading_marks() {
        assert_eq!(project_title("#### Project Atlas "), "Project Atlas");
        assert_eq!(project_title("### Search"), "Search");
    }

    #[test]
    fn multiple_roles_ignores_plain_sub_headers() {
        let parser = ResumeParser::new(Strategy::MultipleRoles, "Acme");
        let state = parser.initial_state();
        let state = Strategy::MultipleRoles.handle_line(state, "#### Ignored", true);
        assert!(state.record.experience_content.is_empty());
    }

    #[test]
    fn body_lines_before_any_project_are_dropped() {
        for strategy in [Strategy::ProjectParas, Strategy::ProjectBullets] {
            let state = ResumeParser::new(strategy, "Acme").initial_state();
            let state = strategy.handle_line(state, "- stray", false);
            assert!(state.record.experience_content.is_empty());
        }
    }

    #[test]
    fn project_lines_follow_the_project_shape() {
        let paras = ResumeParser::new(Strategy::ProjectParas, "Acme").initial_state();
        let paras = Strategy::ProjectParas.handle_line(paras, "#### Atlas", true);
        let paras = Strategy::ProjectParas.handle_line(paras, "first", false);
        let paras = Strategy::ProjectParas.handle_line(paras, " second ", false);
        assert_eq!(
            paras.record.experience_content,
            ExperienceContent::Projects(vec![ProjectEntry {
                project_title: "Atlas".into(),
                experience_content: ProjectContent::Paragraph("second".into()),
            }])
        );

        let bullets = ResumeParser::new(Strategy::ProjectBullets, "Acme").initial_state();
        let bullets = Strategy::ProjectBullets.handle_line(bullets, "#### Atlas", true);
        let bullets = Strategy::ProjectBullets.handle_line(bullets, "- a", false);
        let bullets = Strategy::ProjectBullets.handle_line(bullets, "- b", false);
        assert_eq!(
            bullets.record.experience_content,
            ExperienceContent::Projects(vec![ProjectEntry {
                project_title: "Atlas".into(),
                experience_content: ProjectContent::Bullets(vec!["- a".into(), "- b".into()]),
            }])
        );
    }
}
