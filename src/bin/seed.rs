use chrono::Utc;
use clap::Parser;
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use studyhub::{
    domain::{Faculty, Note, Program, ProgramLevel, Subject},
    repository::{
        CatalogRepository, NoteRepository, SqliteCatalogRepository, SqliteNoteRepository,
    },
};

#[derive(Parser)]
#[command(about = "Seed the StudyHub database with catalog data and sample notes")]
struct Args {
    /// How many sample notes to create per subject
    #[arg(long, default_value_t = 2)]
    notes_per_subject: usize,

    /// Skip sample note creation, seed the catalog only
    #[arg(long)]
    catalog_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    // Initialize database connection
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:studyhub.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let catalog_repo = SqliteCatalogRepository::new(db_pool.clone());
    let note_repo = SqliteNoteRepository::new(db_pool.clone());

    println!("🏛️  Creating faculties and programs...");

    let management = catalog_repo
        .create_faculty(Faculty {
            id: Uuid::new_v4(),
            name: "Faculty of Management".to_string(),
            code: "FOM".to_string(),
            description: Some("Business and management studies".to_string()),
        })
        .await?;

    let science = catalog_repo
        .create_faculty(Faculty {
            id: Uuid::new_v4(),
            name: "Faculty of Science and Technology".to_string(),
            code: "FOST".to_string(),
            description: Some("Science, engineering and IT programs".to_string()),
        })
        .await?;

    let bba = catalog_repo
        .create_program(Program {
            id: Uuid::new_v4(),
            faculty_id: management.id,
            name: "Bachelor of Business Administration".to_string(),
            code: "BBA".to_string(),
            level: ProgramLevel::Undergraduate,
            total_semesters: 8,
            description: None,
        })
        .await?;

    let bsc_csit = catalog_repo
        .create_program(Program {
            id: Uuid::new_v4(),
            faculty_id: science.id,
            name: "BSc Computer Science and IT".to_string(),
            code: "BSC-CSIT".to_string(),
            level: ProgramLevel::Undergraduate,
            total_semesters: 8,
            description: None,
        })
        .await?;

    println!("📚 Creating subjects...");

    let subject_specs = [
        (bba.id, "Principles of Management", "MGT101", 1, 3),
        (bba.id, "Business Economics", "ECO102", 1, 3),
        (bba.id, "Financial Accounting", "ACC201", 2, 3),
        (bsc_csit.id, "Introduction to Information Technology", "CSC109", 1, 4),
        (bsc_csit.id, "C Programming", "CSC110", 1, 4),
        (bsc_csit.id, "Data Structures and Algorithms", "CSC206", 3, 3),
    ];

    let mut subjects = Vec::new();
    for (program_id, name, code, semester, credits) in subject_specs {
        let subject = catalog_repo
            .create_subject(Subject {
                id: Uuid::new_v4(),
                program_id,
                name: name.to_string(),
                code: code.to_string(),
                semester,
                credits: Some(credits),
                description: None,
            })
            .await?;
        subjects.push(subject);
    }

    println!("  ✅ Created 2 faculties, 2 programs, {} subjects", subjects.len());

    if !args.catalog_only {
        println!("📝 Creating sample notes...");

        let mut created = 0usize;
        for subject in &subjects {
            for i in 0..args.notes_per_subject {
                let uploader_name: String = Name().fake();
                let uploader_email: String = SafeEmail().fake();
                let now = Utc::now();

                note_repo
                    .create(Note {
                        id: Uuid::new_v4(),
                        subject_id: subject.id,
                        title: format!("{} - Unit {} Notes", subject.name, i + 1),
                        description: Some(format!("Lecture notes for {}", subject.name)),
                        file_url: format!(
                            "https://storage.example.com/notes/{}-unit-{}.pdf",
                            subject.code.to_lowercase(),
                            i + 1
                        ),
                        file_name: format!("{}-unit-{}.pdf", subject.code.to_lowercase(), i + 1),
                        file_size: Some(512 * 1024),
                        file_type: "application/pdf".to_string(),
                        uploader_name: Some(uploader_name),
                        uploader_email: Some(uploader_email),
                        download_count: 0,
                        rating_sum: 0,
                        rating_count: 0,
                        tags: vec![subject.code.clone(), format!("semester-{}", subject.semester)],
                        is_verified: i == 0,
                        created_at: now,
                        updated_at: now,
                    })
                    .await?;
                created += 1;
            }
        }

        println!("  ✅ Created {} sample notes", created);
    }

    println!("🎉 Seeding complete!");

    Ok(())
}
