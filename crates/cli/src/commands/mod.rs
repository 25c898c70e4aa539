pub mod init;
pub mod lineage;
pub mod regions;
pub mod run;
