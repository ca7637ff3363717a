// src/store/seed.rs

use chrono::NaiveDate;

use crate::models::client::{Client, Document, MortgageStatus, Reminder};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

// Demo dataset so a fresh deployment shows a populated dashboard.
// Legacy records: no created_at, wait-time analytics fall back to the
// joined date at midnight.
pub fn demo_clients() -> Vec<Client> {
    vec![
        Client {
            id: "1001".to_string(),
            first_name: "ישראל".to_string(),
            last_name: "ישראלי".to_string(),
            phone: "050-1234567".to_string(),
            email: "israel@example.com".to_string(),
            requested_amount: 1_500_000,
            status: MortgageStatus::InProcess,
            monthly_income: 18_000,
            credit_score: 820,
            joined_date: date(2023, 10, 15),
            created_at: None,
            notes: "לקוח מחפש משכנתא לדירה ראשונה בראשון לציון.".to_string(),
            documents: vec![
                Document {
                    id: "d1".to_string(),
                    name: "תעודת זהות".to_string(),
                    doc_type: "PDF".to_string(),
                    is_signed: true,
                    upload_date: date(2023, 10, 16),
                },
                Document {
                    id: "d2".to_string(),
                    name: "תלושי שכר (3 חודשים)".to_string(),
                    doc_type: "PDF".to_string(),
                    is_signed: false,
                    upload_date: date(2023, 10, 17),
                },
            ],
            reminders: vec![Reminder {
                id: "r1".to_string(),
                due_date: date(2023, 11, 20),
                due_time: "10:00".to_string(),
                note: "להתקשר לבדוק סטטוס מסמכים".to_string(),
                is_completed: false,
            }],
        },
        Client {
            id: "1002".to_string(),
            first_name: "שרה".to_string(),
            last_name: "כהן".to_string(),
            phone: "052-9876543".to_string(),
            email: "sara@example.com".to_string(),
            requested_amount: 850_000,
            status: MortgageStatus::Approved,
            monthly_income: 12_500,
            credit_score: 750,
            joined_date: date(2023, 9, 20),
            created_at: None,
            notes: "משכנתא לשיפוץ. אישור עקרוני התקבל.".to_string(),
            documents: vec![Document {
                id: "d3".to_string(),
                name: "אישור בעלות".to_string(),
                doc_type: "PDF".to_string(),
                is_signed: true,
                upload_date: date(2023, 9, 21),
            }],
            reminders: vec![],
        },
        Client {
            id: "1003".to_string(),
            first_name: "דוד".to_string(),
            last_name: "לוי".to_string(),
            phone: "054-5555555".to_string(),
            email: "david@example.com".to_string(),
            requested_amount: 2_200_000,
            status: MortgageStatus::New,
            monthly_income: 25_000,
            credit_score: 680,
            joined_date: date(2023, 10, 25),
            created_at: None,
            notes: "פנייה חדשה מאתר האינטרנט.".to_string(),
            documents: vec![],
            reminders: vec![],
        },
    ]
}
