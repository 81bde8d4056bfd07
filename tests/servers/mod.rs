mod health_check_api;
