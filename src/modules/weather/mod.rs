mod open_meteo_client;

pub use open_meteo_client::{
    describe_weather_code, CurrentWeather, OpenMeteoClient, WeatherError, WeatherProvider,
};
