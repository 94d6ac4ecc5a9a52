pub mod mem_registry;
pub mod uploaded_jd;
