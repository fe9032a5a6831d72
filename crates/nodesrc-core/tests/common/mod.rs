pub mod tar_server;
