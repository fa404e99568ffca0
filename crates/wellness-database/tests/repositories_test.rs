//! Integration tests for entity-specific finders.

mod helpers;

use chrono::{Duration, Utc};
use serde_json::json;

use wellness_core::error::ErrorKind;
use wellness_core::traits::Repository;
use wellness_entity::campaign::NewCampaign;
use wellness_entity::form::{NewAnswer, NewForm, NewQuestion, QuestionKind};
use wellness_entity::learning::{NewCourse, NewLesson, NewModule, NewTrail};
use wellness_entity::organization::{
    MemberRole, NewDepartment, NewOrganization, NewOrganizationMember,
};
use wellness_entity::profile::{NewProfile, ProfileRole};

fn new_profile(email: &str, name: &str, role: ProfileRole) -> NewProfile {
    NewProfile {
        email: email.into(),
        name: name.into(),
        role,
        department_id: None,
    }
}

#[tokio::test]
async fn test_profile_finders() {
    let app = helpers::TestApp::new();
    let repos = &app.repos;

    let org = repos
        .organizations
        .create(NewOrganization {
            name: "Acme Saúde".into(),
            owner_id: None,
        })
        .await
        .unwrap();
    let hr = repos
        .departments
        .create(NewDepartment {
            organization_id: org.id,
            name: "People".into(),
        })
        .await
        .unwrap();

    let ana = repos
        .profiles
        .create(NewProfile {
            department_id: Some(hr.id),
            ..new_profile("Ana@Example.com", "Ana", ProfileRole::Manager)
        })
        .await
        .unwrap();
    let bruno = repos
        .profiles
        .create(new_profile("bruno@example.com", "Bruno", ProfileRole::Employee))
        .await
        .unwrap();
    repos
        .profiles
        .create(new_profile("caio@example.com", "Caio", ProfileRole::Employee))
        .await
        .unwrap();

    for (profile, role) in [(ana.id, MemberRole::Admin), (bruno.id, MemberRole::Member)] {
        repos
            .members
            .create(NewOrganizationMember {
                organization_id: org.id,
                profile_id: profile,
                role,
            })
            .await
            .unwrap();
    }

    let found = repos.profiles.find_by_email("ana@example.com").await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(ana.id));

    let employees = repos.profiles.find_by_role(ProfileRole::Employee).await.unwrap();
    assert_eq!(employees.len(), 2);

    let in_hr = repos.profiles.find_by_department_id(hr.id).await.unwrap();
    assert_eq!(in_hr.len(), 1);

    let in_org = repos.profiles.find_by_organization_id(org.id).await.unwrap();
    let names: Vec<_> = in_org.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bruno"]);

    let members = repos.members.find_by_organization_id(org.id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.profile.is_some()));

    let orgs = repos.organizations.find_by_id(org.id).await.unwrap().unwrap();
    assert_eq!(orgs.departments.map(|d| d.len()), Some(1));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = helpers::TestApp::new();
    let profiles = &app.repos.profiles;
    profiles
        .create(new_profile("dup@example.com", "One", ProfileRole::Employee))
        .await
        .unwrap();
    let err = profiles
        .create(new_profile("dup@example.com", "Two", ProfileRole::Employee))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn test_learning_hierarchy_finders() {
    let app = helpers::TestApp::new();
    let repos = &app.repos;

    let trail = repos
        .trails
        .create(NewTrail {
            title: "Sono".into(),
            description: None,
        })
        .await
        .unwrap();
    let course = repos
        .courses
        .create(NewCourse {
            trail_id: Some(trail.id),
            title: "Higiene do sono".into(),
            description: Some("Rotinas noturnas".into()),
        })
        .await
        .unwrap();
    for (title, order) in [("Ritmo", 2), ("Ambiente", 1), ("Hábitos", 3)] {
        repos
            .modules
            .create(NewModule {
                course_id: course.id,
                title: title.into(),
                order,
            })
            .await
            .unwrap();
    }

    let modules = repos.modules.find_by_course_id(course.id).await.unwrap();
    let titles: Vec<_> = modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Ambiente", "Ritmo", "Hábitos"]);

    let first = &modules[0];
    repos
        .lessons
        .create(NewLesson {
            module_id: first.id,
            title: "Luz".into(),
            content: None,
            video_url: None,
            order: 1,
        })
        .await
        .unwrap();
    let lessons = repos.lessons.find_by_module_id(first.id).await.unwrap();
    assert_eq!(lessons.len(), 1);

    let with_lessons = repos.modules.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(with_lessons.lessons.map(|l| l.len()), Some(1));

    assert_eq!(repos.courses.find_by_trail_id(trail.id).await.unwrap().len(), 1);
    let trail = repos.trails.find_by_id(trail.id).await.unwrap().unwrap();
    assert_eq!(trail.courses.map(|c| c.len()), Some(1));
}

#[tokio::test]
async fn test_form_question_answer_finders() {
    let app = helpers::TestApp::new();
    let repos = &app.repos;

    let form = repos
        .forms
        .create(NewForm {
            organization_id: None,
            title: "Pulse".into(),
            description: None,
        })
        .await
        .unwrap();
    let mood = repos
        .questions
        .create(NewQuestion {
            form_id: form.id,
            text: "How do you feel?".into(),
            kind: QuestionKind::Scale,
            group: Some("mood".into()),
            options: Vec::new(),
            order: 1,
        })
        .await
        .unwrap();
    repos
        .questions
        .create(NewQuestion {
            form_id: form.id,
            text: "Anything else?".into(),
            kind: QuestionKind::Text,
            group: None,
            options: Vec::new(),
            order: 2,
        })
        .await
        .unwrap();
    let profile = repos
        .profiles
        .create(new_profile("eva@example.com", "Eva", ProfileRole::Employee))
        .await
        .unwrap();
    let answer = repos
        .answers
        .create(NewAnswer {
            form_id: form.id,
            question_id: mood.id,
            profile_id: profile.id,
            value: json!(4),
        })
        .await
        .unwrap();

    assert_eq!(repos.questions.find_by_form_id(form.id).await.unwrap().len(), 2);
    assert_eq!(repos.questions.find_by_group("mood").await.unwrap().len(), 1);

    let by_form = repos.answers.find_by_form_id(form.id).await.unwrap();
    assert_eq!(by_form.len(), 1);
    assert_eq!(
        by_form[0].question.as_ref().map(|q| q.id),
        Some(mood.id)
    );
    assert_eq!(repos.answers.find_by_question_id(mood.id).await.unwrap().len(), 1);
    assert_eq!(repos.answers.find_by_profile_id(profile.id).await.unwrap().len(), 1);

    let loaded = repos.forms.find_by_slug(&form.slug).await.unwrap().unwrap();
    assert_eq!(loaded.questions.map(|q| q.len()), Some(2));

    // Answers are hard-deleted.
    assert!(repos.answers.delete(answer.id).await.unwrap());
    assert_eq!(repos.answers.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_campaign_active_window() {
    let app = helpers::TestApp::new();
    let repos = &app.repos;
    let org = repos
        .organizations
        .create(NewOrganization {
            name: "Acme".into(),
            owner_id: None,
        })
        .await
        .unwrap();
    let form = repos
        .forms
        .create(NewForm {
            organization_id: Some(org.id),
            title: "Pulse".into(),
            description: None,
        })
        .await
        .unwrap();

    let now = Utc::now();
    for (title, start, end) in [
        ("Running", now - Duration::days(1), now + Duration::days(1)),
        ("Finished", now - Duration::days(10), now - Duration::days(3)),
        ("Upcoming", now + Duration::days(2), now + Duration::days(9)),
    ] {
        repos
            .campaigns
            .create(NewCampaign {
                organization_id: org.id,
                form_id: form.id,
                title: title.into(),
                starts_at: start,
                ends_at: end,
            })
            .await
            .unwrap();
    }

    let active = repos.campaigns.find_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title, "Running");
    assert_eq!(active[0].form.as_ref().map(|f| f.id), Some(form.id));

    let later = repos
        .campaigns
        .find_active_at(now + Duration::days(3))
        .await
        .unwrap();
    assert_eq!(later[0].title, "Upcoming");

    let by_org = repos.campaigns.find_by_organization_id(org.id).await.unwrap();
    let titles: Vec<_> = by_org.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Upcoming", "Running", "Finished"]);

    assert_eq!(repos.forms.find_by_organization_id(org.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_patches_live_rows() {
    let app = helpers::TestApp::new();
    let repos = &app.repos;
    let project = repos
        .projects
        .create(wellness_entity::project::NewProject {
            organization_id: wellness_core::types::OrganizationId::new(),
            name: "Walking challenge".into(),
            description: None,
            status: Default::default(),
        })
        .await
        .unwrap();

    let patch = helpers::document(json!({ "status": "active", "id": "ignored" }));
    let updated = repos.projects.update(project.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.id, project.id);
    assert_eq!(updated.status, wellness_entity::project::ProjectStatus::Active);
    assert!(updated.updated_at >= project.updated_at);

    assert!(repos.projects.delete(project.id).await.unwrap());
    let patch = helpers::document(json!({ "status": "completed" }));
    assert!(repos.projects.update(project.id, patch).await.unwrap().is_none());
    assert!(
        repos
            .projects
            .find_by_organization_id(project.organization_id)
            .await
            .unwrap()
            .is_empty()
    );
}
