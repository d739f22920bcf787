//! Template catalog seeding.
//!
//! Inserts the built-in form templates on first startup. This should be
//! called after migrations. It is idempotent - if any templates already
//! exist, it does nothing, so operator edits to the catalog survive
//! restarts.

use persistence::repositories::TemplateRepository;
use serde_json::{json, Value};
use tracing::info;

/// A built-in template definition.
struct BuiltinTemplate {
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: &'static str,
    config: Value,
}

/// Seed the template catalog if it is empty.
///
/// Returns the number of templates inserted (zero when the catalog was
/// already populated).
pub async fn seed_templates(repo: &TemplateRepository) -> Result<u64, sqlx::Error> {
    let existing = repo.count().await?;
    if existing > 0 {
        return Ok(0);
    }

    info!("Seeding templates");

    let templates = builtin_templates();
    let mut inserted = 0u64;
    for template in &templates {
        repo.create(
            template.name,
            template.description,
            template.icon,
            template.category,
            &template.config,
        )
        .await?;
        inserted += 1;
    }

    Ok(inserted)
}

/// The built-in template catalog.
///
/// Each config is a complete form definition (title, steps, fields) that the
/// frontend instantiates into a new draft form.
fn builtin_templates() -> Vec<BuiltinTemplate> {
    vec![
        BuiltinTemplate {
            name: "Contact Form",
            description: "Simple contact form for websites.",
            icon: "Mail",
            category: "Business",
            config: json!({
                "title": "Contact Us",
                "description": "We would love to hear from you.",
                "steps": [
                    {
                        "title": "Your Details",
                        "description": "Let us know who you are.",
                        "fields": [
                            {"type": "text", "label": "Name", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "Email", "required": true, "orderIndex": 1},
                            {"type": "textarea", "label": "Message", "required": true, "orderIndex": 2}
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Job Application",
            description: "Standard job application form.",
            icon: "Briefcase",
            category: "HR",
            config: json!({
                "title": "Job Application",
                "description": "Apply for our open positions.",
                "steps": [
                    {
                        "title": "Personal Info",
                        "description": "Basic information.",
                        "fields": [
                            {"type": "text", "label": "Full Name", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "Email", "required": true, "orderIndex": 1},
                            {"type": "text", "label": "Phone", "required": true, "orderIndex": 2}
                        ]
                    },
                    {
                        "title": "Experience",
                        "description": "Tell us about your work history.",
                        "fields": [
                            {"type": "textarea", "label": "Resume / Cover Letter", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "LinkedIn Profile", "required": false, "orderIndex": 1}
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Event Registration",
            description: "Register attendees for an event.",
            icon: "Calendar",
            category: "Events",
            config: json!({
                "title": "Event Registration",
                "description": "Join us for our upcoming event.",
                "steps": [
                    {
                        "title": "Attendee Info",
                        "description": "Who is coming?",
                        "fields": [
                            {"type": "text", "label": "Name", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "Email", "required": true, "orderIndex": 1},
                            {
                                "type": "select", "label": "Ticket Type", "required": true, "orderIndex": 2,
                                "options": [
                                    {"label": "General Admission", "value": "general"},
                                    {"label": "VIP", "value": "vip"}
                                ]
                            }
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Client Intake",
            description: "Collect onboarding details for a new client.",
            icon: "ClipboardList",
            category: "Business",
            config: json!({
                "title": "Client Intake",
                "description": "Help us onboard you faster.",
                "steps": [
                    {
                        "title": "Company Details",
                        "description": "Tell us about your business.",
                        "fields": [
                            {"type": "text", "label": "Company Name", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "Website", "required": false, "orderIndex": 1},
                            {
                                "type": "select", "label": "Company Size", "required": true, "orderIndex": 2,
                                "options": [
                                    {"label": "1-10", "value": "1-10"},
                                    {"label": "11-50", "value": "11-50"},
                                    {"label": "51-200", "value": "51-200"},
                                    {"label": "201+", "value": "201+"}
                                ]
                            }
                        ]
                    },
                    {
                        "title": "Project Goals",
                        "description": "Define your goals and timeline.",
                        "fields": [
                            {"type": "textarea", "label": "Primary Goals", "required": true, "orderIndex": 0},
                            {"type": "date", "label": "Target Launch Date", "required": false, "orderIndex": 1}
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Product Feedback",
            description: "Capture feature requests and usability feedback.",
            icon: "MessageSquare",
            category: "Product",
            config: json!({
                "title": "Product Feedback",
                "description": "We value your thoughts on our product.",
                "steps": [
                    {
                        "title": "Experience",
                        "description": "How was your experience?",
                        "fields": [
                            {
                                "type": "select", "label": "Overall Satisfaction", "required": true, "orderIndex": 0,
                                "options": [
                                    {"label": "Excellent", "value": "excellent"},
                                    {"label": "Good", "value": "good"},
                                    {"label": "Fair", "value": "fair"},
                                    {"label": "Poor", "value": "poor"}
                                ]
                            },
                            {"type": "textarea", "label": "What did you like most?", "required": false, "orderIndex": 1}
                        ]
                    },
                    {
                        "title": "Improvements",
                        "description": "What can we do better?",
                        "fields": [
                            {"type": "textarea", "label": "Feature Requests", "required": false, "orderIndex": 0},
                            {"type": "checkbox", "label": "May we contact you for follow-up?", "required": false, "orderIndex": 1}
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Event Volunteer",
            description: "Organize volunteer availability and skills.",
            icon: "Users",
            category: "Events",
            config: json!({
                "title": "Volunteer Sign-Up",
                "description": "Join the event team.",
                "steps": [
                    {
                        "title": "Volunteer Details",
                        "description": "Introduce yourself.",
                        "fields": [
                            {"type": "text", "label": "Full Name", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "Email", "required": true, "orderIndex": 1},
                            {
                                "type": "select", "label": "Preferred Role", "required": true, "orderIndex": 2,
                                "options": [
                                    {"label": "Registration", "value": "registration"},
                                    {"label": "Logistics", "value": "logistics"},
                                    {"label": "Guest Support", "value": "support"}
                                ]
                            }
                        ]
                    },
                    {
                        "title": "Availability",
                        "description": "Let us know when you're free.",
                        "fields": [
                            {"type": "checkbox", "label": "Weekday Morning", "required": false, "orderIndex": 0},
                            {"type": "checkbox", "label": "Weekday Evening", "required": false, "orderIndex": 1},
                            {"type": "checkbox", "label": "Weekend", "required": false, "orderIndex": 2}
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Customer NPS",
            description: "Measure loyalty and collect improvement ideas.",
            icon: "Star",
            category: "Customer Success",
            config: json!({
                "title": "Customer NPS Survey",
                "description": "Help us improve your experience.",
                "steps": [
                    {
                        "title": "NPS",
                        "description": "Rate your experience.",
                        "fields": [
                            {"type": "number", "label": "How likely are you to recommend us? (0-10)", "required": true, "orderIndex": 0},
                            {"type": "textarea", "label": "What influenced your score?", "required": false, "orderIndex": 1}
                        ]
                    },
                    {
                        "title": "Follow-up",
                        "description": "Tell us more.",
                        "fields": [
                            {
                                "type": "select", "label": "Primary Use Case", "required": false, "orderIndex": 0,
                                "options": [
                                    {"label": "Internal Operations", "value": "ops"},
                                    {"label": "Customer Success", "value": "cs"},
                                    {"label": "Marketing", "value": "marketing"}
                                ]
                            },
                            {"type": "textarea", "label": "Anything else we should know?", "required": false, "orderIndex": 1}
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Blood Donation Intake",
            description: "Screen blood donors and schedule appointments.",
            icon: "HeartPulse",
            category: "Healthcare",
            config: json!({
                "title": "Blood Donation Intake",
                "description": "Confirm eligibility and schedule a donation.",
                "steps": [
                    {
                        "title": "Eligibility",
                        "description": "Quick eligibility checks.",
                        "fields": [
                            {"type": "number", "label": "Age", "required": true, "orderIndex": 0},
                            {"type": "number", "label": "Weight (kg)", "required": true, "orderIndex": 1},
                            {
                                "type": "select", "label": "Donated in last 8 weeks?", "required": true, "orderIndex": 2,
                                "options": [
                                    {"label": "Yes", "value": "yes"},
                                    {"label": "No", "value": "no"}
                                ]
                            }
                        ]
                    },
                    {
                        "title": "Health History",
                        "description": "Health background.",
                        "fields": [
                            {"type": "textarea", "label": "Current medications", "required": false, "orderIndex": 0},
                            {
                                "type": "select", "label": "Any recent vaccinations?", "required": false, "orderIndex": 1,
                                "options": [
                                    {"label": "No", "value": "no"},
                                    {"label": "Within 2 weeks", "value": "2w"},
                                    {"label": "More than 2 weeks ago", "value": "more_2w"}
                                ]
                            }
                        ]
                    },
                    {
                        "title": "Schedule",
                        "description": "Choose a slot.",
                        "fields": [
                            {"type": "date", "label": "Preferred date", "required": true, "orderIndex": 0},
                            {
                                "type": "select", "label": "Preferred time", "required": true, "orderIndex": 1,
                                "options": [
                                    {"label": "Morning", "value": "morning"},
                                    {"label": "Afternoon", "value": "afternoon"},
                                    {"label": "Evening", "value": "evening"}
                                ]
                            }
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Medical Intake",
            description: "Collect patient details and symptoms.",
            icon: "Stethoscope",
            category: "Healthcare",
            config: json!({
                "title": "Patient Intake",
                "description": "Provide medical history and appointment details.",
                "steps": [
                    {
                        "title": "Patient Details",
                        "description": "Basic information.",
                        "fields": [
                            {"type": "text", "label": "Full Name", "required": true, "orderIndex": 0},
                            {"type": "date", "label": "Date of Birth", "required": true, "orderIndex": 1},
                            {"type": "text", "label": "Phone", "required": true, "orderIndex": 2},
                            {"type": "text", "label": "Email", "required": false, "orderIndex": 3}
                        ]
                    },
                    {
                        "title": "Health History",
                        "description": "Current symptoms.",
                        "fields": [
                            {"type": "textarea", "label": "Reason for visit", "required": true, "orderIndex": 0},
                            {"type": "textarea", "label": "Current medications", "required": false, "orderIndex": 1},
                            {
                                "type": "select", "label": "Allergies?", "required": false, "orderIndex": 2,
                                "options": [
                                    {"label": "No", "value": "no"},
                                    {"label": "Yes", "value": "yes"}
                                ]
                            }
                        ]
                    },
                    {
                        "title": "Appointment",
                        "description": "Scheduling preferences.",
                        "fields": [
                            {"type": "date", "label": "Preferred date", "required": true, "orderIndex": 0},
                            {
                                "type": "select", "label": "Preferred time", "required": true, "orderIndex": 1,
                                "options": [
                                    {"label": "Morning", "value": "morning"},
                                    {"label": "Afternoon", "value": "afternoon"},
                                    {"label": "Evening", "value": "evening"}
                                ]
                            }
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Course Registration",
            description: "Enroll learners and capture goals.",
            icon: "BookOpen",
            category: "Education",
            config: json!({
                "title": "Course Registration",
                "description": "Register for a training program.",
                "steps": [
                    {
                        "title": "Student Info",
                        "description": "Tell us about you.",
                        "fields": [
                            {"type": "text", "label": "Full Name", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "Email", "required": true, "orderIndex": 1},
                            {"type": "text", "label": "Phone", "required": false, "orderIndex": 2}
                        ]
                    },
                    {
                        "title": "Program Details",
                        "description": "Pick a track.",
                        "fields": [
                            {
                                "type": "select", "label": "Track", "required": true, "orderIndex": 0,
                                "options": [
                                    {"label": "Beginner", "value": "beginner"},
                                    {"label": "Intermediate", "value": "intermediate"},
                                    {"label": "Advanced", "value": "advanced"}
                                ]
                            },
                            {
                                "type": "select", "label": "Schedule", "required": false, "orderIndex": 1,
                                "options": [
                                    {"label": "Weekdays", "value": "weekdays"},
                                    {"label": "Weekends", "value": "weekends"},
                                    {"label": "Evenings", "value": "evenings"}
                                ]
                            }
                        ]
                    }
                ]
            }),
        },
        BuiltinTemplate {
            name: "Support Ticket",
            description: "Capture product issues and support requests.",
            icon: "LifeBuoy",
            category: "Support",
            config: json!({
                "title": "Support Ticket",
                "description": "Describe the issue so we can help quickly.",
                "steps": [
                    {
                        "title": "Contact",
                        "description": "How can we reach you?",
                        "fields": [
                            {"type": "text", "label": "Name", "required": true, "orderIndex": 0},
                            {"type": "text", "label": "Email", "required": true, "orderIndex": 1},
                            {"type": "text", "label": "Company", "required": false, "orderIndex": 2}
                        ]
                    },
                    {
                        "title": "Issue Details",
                        "description": "Problem details.",
                        "fields": [
                            {"type": "text", "label": "Product/Module", "required": true, "orderIndex": 0},
                            {
                                "type": "select", "label": "Severity", "required": true, "orderIndex": 1,
                                "options": [
                                    {"label": "Critical", "value": "critical"},
                                    {"label": "High", "value": "high"},
                                    {"label": "Medium", "value": "medium"},
                                    {"label": "Low", "value": "low"}
                                ]
                            },
                            {"type": "textarea", "label": "Steps to reproduce", "required": true, "orderIndex": 2}
                        ]
                    }
                ]
            }),
        },
    ]
}
