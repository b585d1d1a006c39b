mod mysql_gateway;

pub use mysql_gateway::MySqlGateway;
