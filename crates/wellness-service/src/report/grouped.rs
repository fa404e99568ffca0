//! Form answers grouped by question group.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use wellness_core::error::AppError;
use wellness_core::result::AppResult;
use wellness_core::traits::Repository;
use wellness_core::types::{AnswerId, FormId, ProfileId, QuestionId};
use wellness_database::Repositories;
use wellness_database::repositories::answer::AnswerRepository;
use wellness_database::repositories::form::FormRepository;
use wellness_database::repositories::question::QuestionRepository;
use wellness_entity::form::{Answer, Question, QuestionKind};

/// Label of the bucket holding questions without a group. A question whose
/// group reads the same (ignoring case) lands in that bucket too.
pub const UNGROUPED: &str = "ungrouped";

/// Builds per-group answer reports for forms.
#[derive(Debug, Clone)]
pub struct GroupedAnswerReport {
    /// Form repository.
    forms: Arc<FormRepository>,
    /// Question repository.
    questions: Arc<QuestionRepository>,
    /// Answer repository.
    answers: Arc<AnswerRepository>,
}

/// Answers of one form, grouped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnswerReport {
    /// Reported form.
    pub form_id: FormId,
    /// Form title.
    pub form_title: String,
    /// When the report was built.
    pub generated_at: DateTime<Utc>,
    /// Answers included in the report.
    pub total_answers: usize,
    /// Groups in order of their first question; ungrouped last.
    pub groups: Vec<AnswerGroup>,
}

/// Questions sharing a group label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerGroup {
    /// Group label, or [`UNGROUPED`].
    pub label: String,
    /// Questions of the group in form order.
    pub questions: Vec<QuestionAnswers>,
}

impl AnswerGroup {
    /// Number of answers across the group's questions.
    pub fn answer_count(&self) -> usize {
        self.questions.iter().map(|q| q.answers.len()).sum()
    }
}

/// One question and its answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswers {
    pub question_id: QuestionId,
    pub text: String,
    pub kind: QuestionKind,
    pub order: i32,
    /// Oldest first.
    pub answers: Vec<AnswerEntry>,
}

/// A submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub answer_id: AnswerId,
    pub profile_id: ProfileId,
    pub value: Value,
    pub submitted_at: DateTime<Utc>,
}

impl From<Answer> for AnswerEntry {
    fn from(answer: Answer) -> Self {
        Self {
            answer_id: answer.id,
            profile_id: answer.profile_id,
            value: answer.value,
            submitted_at: answer.created_at,
        }
    }
}

impl GroupedAnswerReport {
    /// Creates a new grouped answer report service.
    pub fn new(
        forms: Arc<FormRepository>,
        questions: Arc<QuestionRepository>,
        answers: Arc<AnswerRepository>,
    ) -> Self {
        Self {
            forms,
            questions,
            answers,
        }
    }

    /// Creates the service from a repository set.
    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(
            Arc::clone(&repos.forms),
            Arc::clone(&repos.questions),
            Arc::clone(&repos.answers),
        )
    }

    /// Builds the report for a live form.
    ///
    /// Answers to soft-deleted questions are left out.
    pub async fn generate(&self, form_id: FormId) -> AppResult<FormAnswerReport> {
        let form = self
            .forms
            .find_by_id(form_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("form '{form_id}' not found")))?;

        let questions = self.questions.find_by_form_id(form_id).await?;
        let answers = self.answers.find_by_form_id(form_id).await?;

        let mut by_question: HashMap<QuestionId, Vec<AnswerEntry>> = HashMap::new();
        for answer in answers {
            by_question
                .entry(answer.question_id)
                .or_default()
                .push(answer.into());
        }

        let groups = group_questions(questions, &mut by_question);
        let total_answers = groups.iter().map(AnswerGroup::answer_count).sum();

        let orphaned: usize = by_question.values().map(Vec::len).sum();
        if orphaned > 0 {
            debug!(form_id = %form_id, orphaned, "Skipped answers to removed questions");
        }
        info!(
            form_id = %form_id,
            groups = groups.len(),
            total_answers,
            "Grouped answer report generated"
        );

        Ok(FormAnswerReport {
            form_id,
            form_title: form.title,
            generated_at: Utc::now(),
            total_answers,
            groups,
        })
    }
}

/// Bucket `questions` (already in form order) by group label, moving each
/// question's answers out of `by_question`.
fn group_questions(
    questions: Vec<Question>,
    by_question: &mut HashMap<QuestionId, Vec<AnswerEntry>>,
) -> Vec<AnswerGroup> {
    let mut groups: Vec<AnswerGroup> = Vec::new();
    let mut ungrouped = AnswerGroup {
        label: UNGROUPED.to_string(),
        questions: Vec::new(),
    };

    for question in questions {
        let label = question
            .group
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty() && !label.eq_ignore_ascii_case(UNGROUPED))
            .map(str::to_string);
        let entry = QuestionAnswers {
            answers: by_question.remove(&question.id).unwrap_or_default(),
            question_id: question.id,
            text: question.text,
            kind: question.kind,
            order: question.order,
        };

        match label {
            None => ungrouped.questions.push(entry),
            Some(label) => match groups.iter_mut().find(|g| g.label == label) {
                Some(group) => group.questions.push(entry),
                None => groups.push(AnswerGroup {
                    label,
                    questions: vec![entry],
                }),
            },
        }
    }

    if !ungrouped.questions.is_empty() {
        groups.push(ungrouped);
    }
    groups
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use wellness_core::error::ErrorKind;
    use wellness_database::MemoryStore;
    use wellness_entity::form::{NewAnswer, NewForm, NewQuestion};

    use super::*;

    fn question(form_id: FormId, text: &str, group: Option<&str>, order: i32) -> NewQuestion {
        NewQuestion {
            form_id,
            text: text.to_string(),
            kind: QuestionKind::Scale,
            group: group.map(str::to_string),
            options: Vec::new(),
            order,
        }
    }

    async fn answer(repos: &Repositories, form_id: FormId, question_id: QuestionId, value: i64) {
        repos
            .answers
            .create(NewAnswer {
                form_id,
                question_id,
                profile_id: ProfileId::new(),
                value: json!(value),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_groups_follow_first_question_order() {
        let repos = Repositories::new(Arc::new(MemoryStore::new()));
        let form = repos
            .forms
            .create(NewForm {
                organization_id: None,
                title: "Quarterly pulse".into(),
                description: None,
            })
            .await
            .unwrap();

        // Created out of order on purpose; `order` decides placement.
        let stress = repos
            .questions
            .create(question(form.id, "Workload", Some("Stress"), 3))
            .await
            .unwrap();
        let late_sleep = repos
            .questions
            .create(question(form.id, "Wake-ups", Some("Sleep"), 4))
            .await
            .unwrap();
        let loose = repos
            .questions
            .create(question(form.id, "Anything else?", None, 2))
            .await
            .unwrap();
        let sleep = repos
            .questions
            .create(question(form.id, "Hours slept", Some("Sleep"), 1))
            .await
            .unwrap();
        let removed = repos
            .questions
            .create(question(form.id, "Old question", Some("Sleep"), 5))
            .await
            .unwrap();

        answer(&repos, form.id, late_sleep.id, 2).await;
        answer(&repos, form.id, sleep.id, 7).await;
        answer(&repos, form.id, loose.id, 1).await;
        answer(&repos, form.id, stress.id, 4).await;
        answer(&repos, form.id, removed.id, 9).await;
        assert!(repos.questions.delete(removed.id).await.unwrap());

        let report = GroupedAnswerReport::from_repositories(&repos)
            .generate(form.id)
            .await
            .unwrap();

        let labels: Vec<&str> = report.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Sleep", "Stress", UNGROUPED]);

        let sleep_group: Vec<QuestionId> = report.groups[0]
            .questions
            .iter()
            .map(|q| q.question_id)
            .collect();
        assert_eq!(sleep_group, [sleep.id, late_sleep.id]);
        assert_eq!(report.groups[0].questions[0].answers[0].value, json!(7));

        assert_eq!(report.total_answers, 4);
        assert_eq!(report.form_title, "Quarterly pulse");
    }

    #[tokio::test]
    async fn test_blank_group_is_ungrouped() {
        let repos = Repositories::new(Arc::new(MemoryStore::new()));
        let form = repos
            .forms
            .create(NewForm {
                organization_id: None,
                title: "Check-in".into(),
                description: None,
            })
            .await
            .unwrap();
        repos
            .questions
            .create(question(form.id, "Mood", Some("  "), 1))
            .await
            .unwrap();

        let report = GroupedAnswerReport::from_repositories(&repos)
            .generate(form.id)
            .await
            .unwrap();
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].label, UNGROUPED);
        assert!(report.groups[0].questions[0].answers.is_empty());
        assert_eq!(report.total_answers, 0);
    }

    #[tokio::test]
    async fn test_group_named_ungrouped_shares_the_bucket() {
        let repos = Repositories::new(Arc::new(MemoryStore::new()));
        let form = repos
            .forms
            .create(NewForm {
                organization_id: None,
                title: "Onboarding".into(),
                description: None,
            })
            .await
            .unwrap();
        let named = repos
            .questions
            .create(question(form.id, "Desk setup", Some(" Ungrouped "), 1))
            .await
            .unwrap();
        let loose = repos
            .questions
            .create(question(form.id, "First week", None, 2))
            .await
            .unwrap();
        answer(&repos, form.id, loose.id, 3).await;

        let report = GroupedAnswerReport::from_repositories(&repos)
            .generate(form.id)
            .await
            .unwrap();
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].label, UNGROUPED);
        let ids: Vec<QuestionId> = report.groups[0]
            .questions
            .iter()
            .map(|q| q.question_id)
            .collect();
        assert_eq!(ids, [named.id, loose.id]);
        assert_eq!(report.total_answers, 1);
    }

    #[tokio::test]
    async fn test_unknown_form_is_not_found() {
        let repos = Repositories::new(Arc::new(MemoryStore::new()));
        let err = GroupedAnswerReport::from_repositories(&repos)
            .generate(FormId::new())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
