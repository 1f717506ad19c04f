pub mod civicinfo;
