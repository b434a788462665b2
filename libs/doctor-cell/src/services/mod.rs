pub mod directory;
pub mod memory;
pub mod supabase;

pub use directory::{DoctorDirectory, SharedDirectory};
pub use memory::InMemoryDoctorDirectory;
pub use supabase::SupabaseDoctorDirectory;
